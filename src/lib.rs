// peacecloud: word clouds, frequency tables and topic models from PDFs
//
// This is the library root. Each module corresponds to a stage of the
// frequency pipeline; `pipeline` wires them into the runs behind each
// subcommand.

pub mod config;
pub mod document;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod text;
pub mod topics;
