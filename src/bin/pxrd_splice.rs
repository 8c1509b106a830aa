use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};

use pxrdrs::{read_xye, write_xye, DataSetCollection, Runtime, SpliceConfig, XyeLoader};

fn make_template_config(path: &Path) {
    let yaml_str = match SpliceConfig::default().to_yaml() {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    if let Err(e) = std::fs::write(path, yaml_str) {
        log::error!("Failed to write template config: {e}");
    }
}

fn main() {
    let matches = Command::new("pxrd_splice")
        .about("Combine powder diffraction detector-position scans")
        .arg_required_else_help(true)
        .args_conflicts_with_subcommands(true)
        .subcommand(
            Command::new("new")
                .about("Make a template configuration yaml file")
                .arg(Arg::new("path").required(true)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to the configuration file"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help(
                    "Directory for combined .xye files \
                     (defaults to the first input's directory)",
                ),
        )
        .arg(
            Arg::new("files")
                .action(ArgAction::Append)
                .help("Input .xye files"),
        )
        .get_matches();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Some(("new", sub)) = matches.subcommand() {
        if let Some(path) = sub.get_one::<String>("path") {
            log::info!("Making a template config at {path}...");
            make_template_config(Path::new(path));
            log::info!("Done.");
        }
        return;
    }

    let config = match matches.get_one::<String>("config") {
        Some(path) => {
            log::info!("Loading config from {path}...");
            match SpliceConfig::read_config_file(Path::new(path)) {
                Ok(c) => c,
                Err(e) => {
                    log::error!("{e}");
                    return;
                }
            }
        }
        None => SpliceConfig::default(),
    };
    log::info!("Gap threshold: {}", config.gap_threshold);
    log::info!("Shave count: {}", config.shave_count);
    log::info!("Method: {:?}", config.method);

    let mut collection = DataSetCollection::new();
    for file in matches.get_many::<String>("files").into_iter().flatten() {
        match read_xye(Path::new(file)) {
            Ok(ds) => collection.push(ds),
            Err(e) => log::warn!("Skipping {file}: {e}"),
        }
    }
    if collection.is_empty() {
        log::error!("No input datasets could be read");
        return;
    }

    let runtime = match Runtime::new(config) {
        Ok(r) => r,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };

    let output_dir = match matches.get_one::<String>("output") {
        Some(dir) => PathBuf::from(dir),
        None => collection
            .iter()
            .find_map(|ds| ds.source().and_then(Path::parent).map(Path::to_path_buf))
            .unwrap_or_default(),
    };

    let added = runtime.run(&mut collection, &XyeLoader);
    log::info!("Produced {added} combined dataset(s)");

    for dataset in collection.iter().skip(collection.len() - added) {
        let path = output_dir.join(format!("{}.xye", dataset.name()));
        match write_xye(dataset, &path) {
            Ok(()) => log::info!("Wrote {}", path.display()),
            Err(e) => log::error!("Failed to write {}: {e}", path.display()),
        }
    }

    log::info!("Done.");
}
