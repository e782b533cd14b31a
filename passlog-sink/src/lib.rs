pub mod file_writer;
pub mod format;
pub mod sink;

pub use file_writer::FileWriter;
pub use sink::LogSink;
