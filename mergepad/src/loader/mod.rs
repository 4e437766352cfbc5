//! Document I/O and diffing off the UI thread.
//!
//! A single `std::thread::spawn` thread receives `LoaderRequest`s over a
//! crossbeam channel and answers with `AppEvent::Loader` on the event bus, so
//! reading a large file or diffing two of them never stalls a frame.
pub mod types;
pub mod worker;
