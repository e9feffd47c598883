pub mod formatter;

pub use formatter::{
    format_combined, format_combined_tsv, format_event_detail, format_event_score,
    format_event_table, format_load_summary, format_recovery, format_recovery_value,
    should_use_colors,
};
