use std::sync::Arc;
use std::thread;

use propmatch::{Filter, Properties};

fn main() {
    // One parsed filter shared across worker threads
    let filter = Arc::new(
        Filter::parse("(&(cn=Ba*)(age>=30)(!(banned=true)))").expect("failed to parse filter"),
    );

    let candidates = vec![
        ("Babs Jensen", 35_i64, false),
        ("Babs Jensen", 35_i64, true),
        ("Barry", 12_i64, false),
        ("Tim", 40_i64, false),
    ];

    let handles: Vec<_> = candidates
        .into_iter()
        .map(|(cn, age, banned)| {
            let f = Arc::clone(&filter);
            thread::spawn(move || {
                let props = Properties::new()
                    .set("cn", cn)
                    .set("age", age)
                    .set("banned", banned);
                (cn, f.matches(&props))
            })
        })
        .collect();

    for handle in handles {
        let (cn, result) = handle.join().expect("worker panicked");
        match result {
            Ok(matched) => println!("{cn}: {}", if matched { "match" } else { "no match" }),
            Err(e) => println!("{cn}: error ({e})"),
        }
    }
}
