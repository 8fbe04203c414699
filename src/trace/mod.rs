mod formatter;

pub use formatter::ProgressFormatter;
