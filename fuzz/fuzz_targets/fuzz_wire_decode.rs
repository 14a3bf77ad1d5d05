#![no_main]

use libfuzzer_sys::fuzz_target;

use factmod_core::wire::{read_task, Task};

fuzz_target!(|data: &[u8]| {
    // Should not panic, whatever the length
    if let Ok(task) = Task::decode(data) {
        assert_ne!(task.modulus, 0);
        assert_eq!(Task::decode(&task.encode()).unwrap(), task);
    }

    // Streamed decoding consumes whole frames until EOF or a bad frame
    let mut reader = data;
    while let Ok(Some(_)) = read_task(&mut reader) {}
});
