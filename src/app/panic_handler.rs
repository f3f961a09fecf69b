use std::panic;
use log::error;

/// Routes panics from any thread, capture threads included, into the log.
pub fn setup_panic_handler() {
    panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let message = match panic_info.payload().downcast_ref::<&str>() {
            Some(s) => *s,
            None => match panic_info.payload().downcast_ref::<String>() {
                Some(s) => &s[..],
                None => "Box<Any>",
            },
        };
        let thread = std::thread::current();
        error!(
            "program panic:\nthread: {}\nlocation: {}\nerror: {}",
            thread.name().unwrap_or("<unnamed>"),
            location,
            message
        );
    }));
}
