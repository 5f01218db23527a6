use circuit_grid::catalog;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let filter = std::env::args().nth(1);

    let mut shown = 0usize;
    for entry in catalog::entries() {
        if let Some(f) = &filter {
            if !entry.name().contains(f.as_str()) {
                continue;
            }
        }
        let delay = if entry.takes_delay() { " <length>" } else { "" };
        println!("{:<14} {:?}{delay}", entry.name(), entry.group());
        shown += 1;
    }
    println!("{shown} of {} entries", catalog::entries().len());

    match catalog::validate_all() {
        Ok(()) => println!("all entries are pure"),
        Err(e) => {
            eprintln!("catalog validation failed: {e}");
            std::process::exit(1);
        }
    }
}
