// Output sinks: CSV export and terminal summaries.

pub mod csv;
pub mod terminal;
