//! Prayer texts shown with stage work

/// Shown with stage 3
pub const THIRD_STEP_PRAYER: &str = "God, I offer myself to Thee\u{2014}to build with me and to do with me as Thou wilt. Relieve me of the bondage of self, that I may better do Thy will. Take away my difficulties, that victory over them may bear witness to those I would help of Thy Power, Thy Love, and Thy Way of life. May I do Thy will always!";

/// Shown with stage 7
pub const SEVENTH_STEP_PRAYER: &str = "My Creator, I am now willing that you should have all of me, good and bad. I pray that you now remove from me every single defect of character which stands in the way of my usefulness to you and my fellows. Grant me strength, as I go out from here, to do your bidding. Amen.";
