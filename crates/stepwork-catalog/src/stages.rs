//! The twelve stages of the workbook

use crate::model::{
    ChecklistRow, ChecklistStyle, InventoryColumn, ListItem, Part, Prompt, Resource, Section,
    SectionBody, Stage, StageLayout, StageNumber, WritingItem,
};
use crate::prayers::{SEVENTH_STEP_PRAYER, THIRD_STEP_PRAYER};

const BIG_BOOK: Option<Resource> = Some(Resource {
    url: "https://www.aa.org/the-big-book",
    label: "Read Big Book Online",
});

const fn reading(
    id: &'static str,
    title: &'static str,
    instruction: Option<&'static str>,
    rows: &'static [ChecklistRow],
) -> Section {
    Section {
        id,
        title,
        instruction,
        resource: BIG_BOOK,
        body: SectionBody::Reading(rows),
    }
}

const fn definitions(id: &'static str, prompts: &'static [Prompt]) -> Section {
    Section {
        id,
        title: "Definitions",
        instruction: None,
        resource: None,
        body: SectionBody::Definitions(prompts),
    }
}

const fn todo(
    id: &'static str,
    title: &'static str,
    instruction: Option<&'static str>,
    rows: &'static [ChecklistRow],
) -> Section {
    Section {
        id,
        title,
        instruction,
        resource: None,
        body: SectionBody::Checklist {
            style: ChecklistStyle::Todo,
            rows,
        },
    }
}

const fn prayer(
    id: &'static str,
    title: &'static str,
    instruction: Option<&'static str>,
    rows: &'static [ChecklistRow],
) -> Section {
    Section {
        id,
        title,
        instruction,
        resource: None,
        body: SectionBody::Prayer(rows),
    }
}

const fn list(
    id: &'static str,
    title: &'static str,
    instruction: &'static str,
    items: &'static [ListItem],
) -> Section {
    Section {
        id,
        title,
        instruction: Some(instruction),
        resource: None,
        body: SectionBody::List(items),
    }
}

const fn writing(
    id: &'static str,
    title: &'static str,
    instruction: Option<&'static str>,
    items: &'static [WritingItem],
) -> Section {
    Section {
        id,
        title,
        instruction,
        resource: None,
        body: SectionBody::Writing(items),
    }
}

const READ: &str = "Read With Intent and Purpose";

static STAGE_1_PARTS: [Part; 2] = [
    Part {
        part_number: 1,
        title: None,
        has_assignment_date: true,
        sections: &[
            definitions(
                "s1-p1-definitions",
                &[
                    Prompt::new("admit", "Define: Admit"),
                    Prompt::new("powerless", "Define: Powerless"),
                    Prompt::new("unmanageable", "Define: Unmanageable"),
                ],
            ),
            reading(
                "s1-p1-reading",
                READ,
                Some("Highlight areas that demonstrate 'powerless' and 'unmanageability'"),
                &[ChecklistRow::new("pages_xi_43", "Pages xi-43")],
            ),
        ],
    },
    Part {
        part_number: 2,
        title: None,
        has_assignment_date: true,
        sections: &[
            list(
                "s1-p2-powerlessness",
                "Examples of Powerlessness",
                "List (5) specific examples of 'powerlessness' when you were drinking.",
                &[ListItem::entries("powerless_examples", 5)
                    .with_date()
                    .with_ripple_effects()],
            ),
            list(
                "s1-p2-unmanageability",
                "Examples of Unmanageability",
                "List (5) specific examples of 'unmanageability' when you were drinking.",
                &[ListItem::entries("unmanageable_examples", 5)
                    .with_date()
                    .with_ripple_effects()],
            ),
        ],
    },
];

static STAGE_2_SECTIONS: [Section; 3] = [
    definitions(
        "s2-definitions",
        &[
            Prompt::new("believe", "Define: Believe"),
            Prompt::new("restore", "Define: Restore"),
            Prompt::new("sanity", "Define: Sanity"),
            Prompt::new("insanity", "Define: Insanity"),
        ],
    ),
    reading(
        "s2-reading",
        READ,
        Some("Highlight areas that demonstrate 'insanity'"),
        &[ChecklistRow::new("pages_44_60", "Pages 44-60 (stop at ABC's)")],
    ),
    writing(
        "s2-writing",
        "Writing",
        None,
        &[
            WritingItem::repeated(
                "insanity_examples",
                "Provide (10) specific examples of insanity from your own story",
                10,
            )
            .with_sub_items(&[
                "whether you were drunk or not",
                "relate back to the Big Book if possible",
                "try not to be vague",
            ]),
            WritingItem::answer(
                "higher_power",
                "Write (1) paragraph, tight and concise, of your higher power as you understand it.",
            ),
            WritingItem::repeated(
                "hp_examples",
                "Write (5) examples of higher power and you working together",
                5,
            ),
        ],
    ),
];

static STAGE_3_PARTS: [Part; 1] = [Part {
    part_number: 1,
    title: None,
    has_assignment_date: true,
    sections: &[
        definitions(
            "s3-p1-definitions",
            &[
                Prompt::new("selfish", "Define: Selfish"),
                Prompt::new("self", "Define: Self"),
                Prompt::new("decision", "Define: Decision"),
                Prompt::new("convinced", "Define: Convinced"),
                Prompt::new("life", "Define: Life"),
                Prompt::new("will", "Define: Will"),
                Prompt::new("requirement", "Define: Requirement"),
            ],
        ),
        reading(
            "s3-p1-reading",
            READ,
            None,
            &[ChecklistRow::new(
                "pages_60_63",
                "Pages 60-63 (stop at 'Next we launched')",
            )],
        ),
        todo(
            "s3-p1-todo",
            "To Do",
            None,
            &[
                ChecklistRow::new("memorize_prayer", "Start to memorize the 3rd Step Prayer"),
                ChecklistRow::new("informal_prayer", "Okay to make the prayer less formal"),
                ChecklistRow::new(
                    "pray_10_days",
                    "Say 3rd step prayer every morning for 10 straight days",
                ),
                ChecklistRow::new(
                    "knees_together",
                    "End Step 3 assignment by getting on knees together. Hold hands and say 3rd step prayer together.",
                ),
            ],
        ),
    ],
}];

static STAGE_4_SECTIONS: [Section; 4] = [
    prayer(
        "s4-prayer",
        "Prayer",
        Some("Say prayer, 'God, please help me with my inventory' prior to working on each portion of your step 4 list."),
        &[],
    ),
    definitions(
        "s4-definitions",
        &[
            Prompt::new("launched", "Define: Launched"),
            Prompt::new("moral", "Define: Moral"),
            Prompt::new("vigorous", "Define: Vigorous"),
            Prompt::new("resentment", "Define: Resentment"),
            Prompt::new("action", "Define: Action"),
            Prompt::new("strenuous", "Define: Strenuous"),
        ],
    ),
    reading(
        "s4-reading",
        READ,
        None,
        &[ChecklistRow::new(
            "pages_63_64",
            "Pages 63-64 (stop at 'Next we launched')",
        )],
    ),
    Section {
        id: "s4-resentments",
        title: "Resentment List",
        instruction: Some("Complete the 6-column resentment inventory"),
        resource: None,
        body: SectionBody::Resentment(&[
            InventoryColumn::new(
                "column1",
                "Column 1 - Resentment",
                "List of your resentments (people, principals, things). Don't hold back. List anything and everything that you have resentment for; childhood through current.",
            ),
            InventoryColumn::new(
                "column2",
                "Column 2 - Cause",
                "Brief description of events with short paragraphs. List the top 2-3 events that led to this resentment.",
            ),
            InventoryColumn::new(
                "column3",
                "Column 3 - Affects My",
                "Read with intent and purpose: pg 64 (start at 'we asked ourself') - pg 65 (stop at 'considered it carefully')",
            )
            .with_options(&[
                "Self-esteem",
                "Pocketbook",
                "Ambition (things I want)",
                "Personal relationships",
                "Sexual relationships",
                "Security (things I need)",
            ]),
            InventoryColumn::new(
                "column4",
                "Column 4 - My Part",
                "First, read and highlight with intent and purpose, pg 65 (start at 'the first thing') - pg 67 (stop at 'these matters straight'). Define: Selfish, Dishonest, Self-seeking. List where you were selfish, dishonest, or self-seeking.",
            ),
            InventoryColumn::new(
                "column5",
                "Column 5 - Fear",
                "First, make list of your fears (dump your list of fears. IE, fear of being judged, fear of failure, fear of financial insecurity). Then, write the following: 'God, why do I have this fear (insert the fear). Was it because self-reliance failed me? God, please remove this fear (insert fear) and direct my attention to what you would have me be.' Lastly, list the fear associated with each resentment.",
            ),
            InventoryColumn::new(
                "column6",
                "Column 6 - Sex",
                "First, read and highlight with intent and purpose, pg 68-70 (stop at 'heartache'). Review your sex conduct. Review each relationship whether that person is on your resentment list or not.",
            )
            .with_sub_items(&[
                "Where was I selfish?",
                "Where was I dishonest?",
                "Where was I inconsiderate?",
                "Who did I hurt?",
                "Did I unjustifiably arouse jealousy?",
                "Did I unjustifiably arouse suspicion?",
                "Did I unjustifiably arouse bitterness?",
                "Where was I at fault?",
                "What should I have done instead?",
            ]),
            InventoryColumn::prompt_only("sexual_ideal", "Write paragraph of your sexual ideal."),
        ]),
    },
];

static STAGE_5_SECTIONS: [Section; 3] = [
    reading(
        "s5-reading",
        READ,
        None,
        &[ChecklistRow::new("pages_72_75", "Pages 72-75 (stop at 'returning home')")],
    ),
    definitions(
        "s5-definitions",
        &[
            Prompt::new("admit", "Define: Admit"),
            Prompt::new("exact", "Define: Exact"),
            Prompt::new("nature", "Define: Nature"),
            Prompt::new("wrong", "Define: Wrong"),
        ],
    ),
    todo(
        "s5-todo",
        "To Do",
        None,
        &[
            ChecklistRow::new(
                "check_ideal",
                "Check your description of Sexual Ideal and Ideal Partner",
            ),
            ChecklistRow::new(
                "5th_step_day",
                "Set aside the entire day for 5th step meeting with step guide.",
            ),
            ChecklistRow::new(
                "meditation",
                "After 5th step session, receive receipt, and meditate for 1 hour focusing on what you covered during session.",
            ),
        ],
    ),
];

static STAGE_6_SECTIONS: [Section; 4] = [
    reading(
        "s6-reading",
        READ,
        None,
        &[ChecklistRow::new("page_76_1", "Page 76 (first paragraph)")],
    ),
    definitions(
        "s6-definitions",
        &[
            Prompt::new("objectionable", "Define: Objectionable"),
            Prompt::new("defect", "Define: Defect"),
            Prompt::new("willingness", "Define: Willingness"),
            Prompt::new("indispensable", "Define: Indispensable"),
            Prompt::new("character", "Define: Character"),
        ],
    ),
    list(
        "s6-defects",
        "Character Defects",
        "Make a list of your character defects.",
        &[
            ListItem::note("defects_receipt", "Start with receipt"),
            ListItem::note("defects_spot", "If you spot it, you got it. List it."),
            ListItem::answer(
                "defects_manifest",
                "Detail how each character defect manifests.",
            ),
            ListItem::answer(
                "defects_opposite",
                "List the opposite action of the character defect.",
            ),
        ],
    ),
    list(
        "s6-assets",
        "Character Assets",
        "Make a list of your character assets",
        &[ListItem::answer("assets_list", "List your character assets")],
    ),
];

static STAGE_7_SECTIONS: [Section; 2] = [
    reading(
        "s7-reading",
        READ,
        None,
        &[ChecklistRow::new("page_76_2", "Page 76 (second paragraph)")],
    ),
    prayer(
        "s7-prayer",
        "7th Step Prayer",
        Some("Say the 7th step prayer each day upon awakening and/or at end of day for 14 days in a row."),
        &[
            ChecklistRow::new(
                "focus_defects",
                "Focus on 3 of your character defects in particular and ask them to be removed.",
            ),
            ChecklistRow::new(
                "start_over",
                "Start day over when character defect(s) show up (say 7th step prayer)",
            ),
            ChecklistRow::new(
                "8th_step_note",
                "The 7th step will only have depth and weight if followed by an 8th step list",
            ),
        ],
    ),
];

static STAGE_8_SECTIONS: [Section; 4] = [
    reading(
        "s8-reading",
        READ,
        None,
        &[ChecklistRow::new("page_76_3", "Page 76 (third paragraph)")],
    ),
    definitions("s8-definitions", &[Prompt::new("harm", "Define: Harm")]),
    prayer(
        "s8-prayer",
        "Prayer",
        Some("Pray for your higher power to give you the will and courage to make 8th step list"),
        &[],
    ),
    list(
        "s8-amends",
        "8th Step List",
        "Make your list. Include people, places, and institutions. Include everything; don't hold back or edit.",
        &[ListItem::entries("amends_list_dynamic", 10)
            .with_ripple_effects_label("Specific Harm Committed")
            .with_prompt("List people, places, and institutions.")],
    ),
];

static STAGE_9_SECTIONS: [Section; 3] = [
    todo(
        "s9-review",
        "Review",
        None,
        &[ChecklistRow::new(
            "review_list",
            "Review list with step guide to determine which are appropriate to put on step 9 list, or not.",
        )],
    ),
    reading(
        "s9-reading",
        READ,
        None,
        &[ChecklistRow::new("pages_76_83", "Pages 76-83 (stop at 'the promises')")],
    ),
    writing(
        "s9-scripts",
        "9th Step Scripts",
        Some("Buy 4x6 or 3x5 cards for 9th step scripts. Write script for each person/place on 9th step list."),
        &[WritingItem::templated(
            "script_template",
            "Script: 'I have been sober a while, but I might not stay sober unless I have done my utmost to straighten out my past. [State the specific harm]. I truly regret my behaviour and choices. What can I do to make this right.' [LISTEN]. Follow up with 'Did I leave anything out?' 3 times.",
        )],
    ),
];

static STAGE_10_SECTIONS: [Section; 2] = [
    reading(
        "s10-reading",
        READ,
        None,
        &[ChecklistRow::new("pages_83_88", "Pages 83-88 (through 'promises')")],
    ),
    todo(
        "s10-daily",
        "Daily Practice (30 Days)",
        Some("Go through the following each time a resentment comes up for 30 days."),
        &[
            ChecklistRow::new(
                "look_for",
                "Look for where you were Selfish, Dishonest, Resentful, or Fearful.",
            ),
            ChecklistRow::new(
                "ask_hp",
                "Ask your higher power at once to remove the resentment.",
            ),
            ChecklistRow::new(
                "call_sponsor",
                "Call sponsor, step guide, or another person who has been through the steps in this format each time a resentment comes up and discuss.",
            ),
            ChecklistRow::new("make_amends", "Make amends quickly if appropriate."),
            ChecklistRow::new(
                "turn_thoughts",
                "Resolutely turn your thoughts to someone you can help (alcoholic or not)",
            ),
            ChecklistRow::new(
                "no_chit_chat",
                "Don't chit chat with person before you make the list.",
            ),
            ChecklistRow::new("take_notes", "Take notes daily on your resentments"),
        ],
    ),
];

static STAGE_11_SECTIONS: [Section; 3] = [
    todo(
        "s11-continue",
        "Continue Previous Steps",
        None,
        &[
            ChecklistRow::new(
                "continue_9",
                "Continue 9th Step if you haven't made amends to everyone on your list.",
            ),
            ChecklistRow::new("continue_10", "Continue 10th Step"),
        ],
    ),
    reading(
        "s11-daily",
        "Daily Practice",
        Some("Read 'Upon Awakening' each morning"),
        &[ChecklistRow::new("upon_awakening", "Pages 86-89")],
    ),
    prayer(
        "s11-prayer",
        "Prayer & Meditation",
        None,
        &[
            ChecklistRow::new(
                "pray_meditate",
                "Pray and meditate as described in pgs 86-89.",
            ),
            ChecklistRow::new(
                "pray_sponsees",
                "Pray specifically for sponsees; especially newcomers to work the 12th step",
            ),
        ],
    ),
];

static STAGE_12_SECTIONS: [Section; 4] = [
    reading(
        "s12-reading",
        READ,
        Some("Study the 12th Step chapter"),
        &[ChecklistRow::new(
            "pages_89_103",
            "Pages 89-103 ('Working With Others')",
        )],
    ),
    definitions(
        "s12-definitions",
        &[
            Prompt::new("spiritual", "Define: Spiritual"),
            Prompt::new("awakening", "Define: Awakening"),
            Prompt::new("principles", "Define: Principles"),
        ],
    ),
    todo(
        "s12-message",
        "Carrying the Message",
        Some("The 12th Step is about service and helping others (check to indicate you read)"),
        &[
            ChecklistRow::new(
                "identify_help",
                "Identify alcoholics or others you can help carry this message to.",
            ),
            ChecklistRow::new(
                "available",
                "Make yourself available to newcomers and those seeking help.",
            ),
            ChecklistRow::new(
                "sponsor_ready",
                "Consider becoming a sponsor when you have completed all 12 steps and discussed readiness with your step guide.",
            ),
            ChecklistRow::new(
                "meeting_service",
                "Find ways to be of service in meetings and your recovery community.",
            ),
            ChecklistRow::new(
                "daily_practice",
                "Practice these steps daily as a way of life, not just a program to complete.",
            ),
        ],
    ),
    prayer(
        "s12-daily-practice",
        "11th Step Daily Practice",
        Some("Continue the practices from Step 11 as a lifelong commitment (check to indicate you read)"),
        &[
            ChecklistRow::new("morning_meditation", "Morning prayer and meditation"),
            ChecklistRow::new(
                "evening_review",
                "Evening review of the day - where were you selfish, dishonest, resentful, or afraid?",
            ),
            ChecklistRow::new("spot_check", "Spot-check inventory throughout the day"),
        ],
    ),
];

/// All stages, ordered by number
pub static STAGES: [Stage; 12] = [
    Stage {
        number: StageNumber::from_catalog(1),
        title: "Powerlessness",
        quote: "We admitted we were powerless over alcohol\u{2014}that our lives had become unmanageable.",
        prayer: None,
        layout: StageLayout::Parts(&STAGE_1_PARTS),
    },
    Stage {
        number: StageNumber::from_catalog(2),
        title: "Higher Power",
        quote: "Came to believe that a Power greater than ourselves could restore us to sanity.",
        prayer: None,
        layout: StageLayout::Sections(&STAGE_2_SECTIONS),
    },
    Stage {
        number: StageNumber::from_catalog(3),
        title: "Decision",
        quote: "Made a decision to turn our will and our lives over to the care of God as we understood Him.",
        prayer: Some(THIRD_STEP_PRAYER),
        layout: StageLayout::Parts(&STAGE_3_PARTS),
    },
    Stage {
        number: StageNumber::from_catalog(4),
        title: "Moral Inventory",
        quote: "Made a searching and fearless moral inventory of ourselves.",
        prayer: None,
        layout: StageLayout::Sections(&STAGE_4_SECTIONS),
    },
    Stage {
        number: StageNumber::from_catalog(5),
        title: "Admission",
        quote: "Admitted to God, to ourselves, and to another human being the exact nature of our wrongs.",
        prayer: None,
        layout: StageLayout::Sections(&STAGE_5_SECTIONS),
    },
    Stage {
        number: StageNumber::from_catalog(6),
        title: "Readiness",
        quote: "Were entirely ready to have God remove all these defects of character.",
        prayer: None,
        layout: StageLayout::Sections(&STAGE_6_SECTIONS),
    },
    Stage {
        number: StageNumber::from_catalog(7),
        title: "Humility",
        quote: "Humbly asked Him to remove our shortcomings.",
        prayer: Some(SEVENTH_STEP_PRAYER),
        layout: StageLayout::Sections(&STAGE_7_SECTIONS),
    },
    Stage {
        number: StageNumber::from_catalog(8),
        title: "Amends List",
        quote: "Made a list of all persons we had harmed, and became willing to make amends to them all.",
        prayer: None,
        layout: StageLayout::Sections(&STAGE_8_SECTIONS),
    },
    Stage {
        number: StageNumber::from_catalog(9),
        title: "Direct Amends",
        quote: "Made direct amends to such people wherever possible, except when to do so would injure them or others.",
        prayer: None,
        layout: StageLayout::Sections(&STAGE_9_SECTIONS),
    },
    Stage {
        number: StageNumber::from_catalog(10),
        title: "Continued Inventory",
        quote: "Continued to take personal inventory and when we were wrong promptly admitted it.",
        prayer: None,
        layout: StageLayout::Sections(&STAGE_10_SECTIONS),
    },
    Stage {
        number: StageNumber::from_catalog(11),
        title: "Prayer & Meditation",
        quote: "Sought through prayer and meditation to improve our conscious contact with God as we understood Him, praying only for knowledge of His will for us and the power to carry that out.",
        prayer: None,
        layout: StageLayout::Sections(&STAGE_11_SECTIONS),
    },
    Stage {
        number: StageNumber::from_catalog(12),
        title: "Spiritual Awakening",
        quote: "Having had a spiritual awakening as the result of these steps, we tried to carry this message to alcoholics, and to practice these principles in all our affairs.",
        prayer: None,
        layout: StageLayout::Sections(&STAGE_12_SECTIONS),
    },
];
