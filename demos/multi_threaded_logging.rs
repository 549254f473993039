use std::sync::{Arc, mpsc::channel};

use synclog::{Severity, logger_config};

fn main() {
    let logger = logger_config().with_level(Severity::Verbose).build_shared();
    synclog::info!(logger, "Hello, world!\n");
    // worker threads share the same logger
    let (handles, senders): (Vec<_>, Vec<_>) = (0..5)
        .map(|i| {
            let (sender, receiver) = channel::<&'static str>();
            let logger = Arc::clone(&logger);
            (
                std::thread::spawn(move || {
                    for message in receiver {
                        synclog::warn!(logger, "thread {i} received: {message}\n");
                        synclog::debug!(logger, "thread {i} done with {} bytes\n", message.len());
                    }
                }),
                sender,
            )
        })
        .unzip();
    for sender in senders {
        sender.send("Hello, world!").unwrap();
    }
    for handle in handles {
        handle.join().unwrap();
    }
    for severity in Severity::ALL {
        logger.log(severity, format_args!("logger message at {severity}\n"));
    }
    Arc::try_unwrap(logger)
        .expect("all worker threads have joined")
        .close()
        .unwrap();
}
