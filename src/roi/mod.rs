pub mod calculator;
pub mod report;

pub use calculator::{
    compute, parse_reaction_type, CostModel, ReactionType, RoiInput, RoiInputError, RoiOutput,
};
pub use report::{render_text_report, save_snapshot, snapshot, ReportError, ReportSnapshot};
