//! Studio components: the configuration form, the animated trend chart and
//! the score dial.

mod chart;
mod dial;
mod view;

pub use chart::TrendChart;
pub use dial::ScoreDial;
pub use view::CardStudio;
