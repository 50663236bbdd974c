// Topic modeling: document-term matrix, LDA and the topic report.

pub mod lda;
pub mod matrix;
pub mod report;
pub mod traits;
