use std::fs;

use cachesim::{
    cache::{CacheStats, Model},
    config::Config,
    replace::AccessResult,
    trace::Trace,
};

fn main() {
    simplelog::SimpleLogger::init(log::LevelFilter::Info, simplelog::Config::default())
        .expect("logger init");

    let mut args = pico_args::Arguments::from_env();
    let n_warm: u64 = args
        .opt_value_from_str("-w")
        .expect("-w should be an integer")
        .unwrap_or(0);
    let heartbeat_int: u64 = args
        .opt_value_from_str("-h")
        .expect("-h should be an integer")
        .unwrap_or(0);
    let verbose = args.contains("-v");

    let config_str: String = if let Some(config_str) = args.opt_value_from_str("--config").unwrap()
    {
        config_str
    } else {
        let config_path: String = args
            .opt_value_from_str("-p")
            .unwrap()
            .expect("Must provide a config with --config <json> or -p <path>");
        fs::read_to_string(config_path).expect("Could not find config file")
    };
    let config: Config = serde_json::from_str(&config_str).expect("Malformed config");
    let mut models = config.to_models().expect("Invalid cache geometry");

    let stats_path: Option<String> = args.opt_value_from_str("--json").unwrap();

    let trace_path: String = args
        .opt_value_from_str("-t")
        .unwrap()
        .expect("Must provide a trace with -t");
    let addrs_per_batch: usize = args
        .opt_value_from_str("--buffer-size")
        .expect("--buffer-size must be an integer")
        .unwrap_or(1024 * 16);
    let batches_per_queue: usize = args
        .opt_value_from_str("--queue-size")
        .expect("--queue-size must be an integer")
        .unwrap_or(32);

    let trace =
        Trace::read(trace_path.into(), addrs_per_batch, batches_per_queue).unwrap();

    let mut processed: u64 = 0;
    let mut next_heartbeat = heartbeat_int;
    let mut warmup = n_warm > 0;

    while let Ok(batch) = trace.rec.recv() {
        operate(&mut models, &batch, verbose);
        processed += batch.len() as u64;

        if heartbeat_int != 0 && processed > next_heartbeat {
            println!("Addresses: {processed}");
            while next_heartbeat < processed {
                next_heartbeat += heartbeat_int;
            }
        }

        if warmup && processed >= n_warm {
            models.iter_mut().for_each(|m| m.clear_stats());
            warmup = false;
            log::info!("finished warmup after {processed} addresses");
        }
    }
    println!("Ran {processed} addresses");

    let stats = models.iter().map(|m| m.stats()).collect::<Vec<_>>();

    match stats_path {
        Some(path) => {
            let stats_file = fs::File::create(path).expect("Cannot open output file");
            serde_json::to_writer_pretty(stats_file, &stats).unwrap();
        }
        None => {
            for CacheStats {
                name,
                hits,
                misses,
                hit_rate,
            } in &stats
            {
                println!("{name}: {hits} hits, {misses} misses, hit rate {hit_rate:.4}");
            }
        }
    }
}

fn operate(models: &mut [Box<dyn Model>], addrs: &[i64], verbose: bool) {
    for &addr in addrs {
        for model in models.iter_mut() {
            match model.access(addr) {
                Ok(result) => {
                    if verbose {
                        let outcome = match result {
                            AccessResult::Hit => "hit",
                            AccessResult::Miss => "miss",
                        };
                        println!("{}: address {addr} is a {outcome}", model.name());
                    }
                }
                Err(err) => log::warn!("{}: {err}", model.name()),
            }
        }
    }
}
