// Word cloud rendering.
//
// The mask decides where words may go, the layout engine decides where
// each word goes, and the plotters bitmap backend measures and draws the
// text. Layout only talks to text measurement through `TextMeasure`, so it
// can be exercised without any fonts installed.

pub mod layout;
pub mod mask;
pub mod wordcloud;
