use circuit_grid::circuits;
use circuit_grid::{BoardConfig, BoundaryPolicy, Schedule};
use log::info;

fn usage() -> String {
    format!(
        "Usage: simulate <circuit> [--ticks <N>] [--boundary drop|error] [--parallel] [--json]\n\n\
         Available circuits:\n  - {}",
        circuits::names().join("\n  - ")
    )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("{}", usage());
        std::process::exit(2);
    }

    let mut ticks: usize = 8;
    let mut config = BoardConfig::default();
    let mut json = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                let Some(v) = args.get(i + 1) else {
                    eprintln!("--ticks requires an integer argument");
                    std::process::exit(2);
                };
                ticks = match v.parse::<usize>() {
                    Ok(n) => n,
                    Err(e) => {
                        eprintln!("invalid --ticks {v}: {e}");
                        std::process::exit(2);
                    }
                };
                i += 2;
            }
            "--boundary" => {
                let policy = match args.get(i + 1).map(String::as_str) {
                    Some("drop") => BoundaryPolicy::Drop,
                    Some("error") => BoundaryPolicy::Error,
                    _ => {
                        eprintln!("--boundary requires 'drop' or 'error'");
                        std::process::exit(2);
                    }
                };
                config = config.with_boundary(policy);
                i += 2;
            }
            "--parallel" => {
                config = config.with_schedule(Schedule::Parallel);
                i += 1;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            x => {
                eprintln!("Unknown option: {x}\n\n{}", usage());
                std::process::exit(2);
            }
        }
    }

    let circuit = match circuits::by_name(&args[1]) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}\n\n{}", usage());
            std::process::exit(2);
        }
    };

    info!("circuit {}: {}", circuit.name, circuit.description);
    let mut board = circuit.board;
    board.set_config(config);

    for _ in 0..=ticks {
        if json {
            match serde_json::to_string(&board.snapshot()) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("failed to encode snapshot: {e}");
                    std::process::exit(1);
                }
            }
        } else {
            println!("tick {}", board.tick_count());
            for view in board.snapshot().cells {
                match view.memory {
                    Some(m) => println!(
                        "  {:>10} {:<12} {}  stored={} ticks_since_store={}",
                        view.at.to_string(),
                        view.rule,
                        view.ports,
                        m.stored_bit,
                        m.ticks_since_store
                    ),
                    None => println!(
                        "  {:>10} {:<12} {}",
                        view.at.to_string(),
                        view.rule,
                        view.ports
                    ),
                }
            }
        }

        if board.tick_count() as usize == ticks {
            break;
        }
        if let Err(e) = board.tick() {
            eprintln!("tick failed: {e}");
            std::process::exit(1);
        }
    }

    let stats = board.stats();
    info!(
        "done after {} ticks; last tick propagated {} and dropped {} signals",
        stats.tick, stats.propagated, stats.dropped
    );
}
