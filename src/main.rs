use gravbox::{bench_gravity, run_viewer, SceneConfig, Simulation, TemplateStore};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scene YAML to load at startup; starts empty when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Template store file
    #[arg(short, long, default_value = "templates.yaml")]
    templates: PathBuf,

    /// Print the accumulation timing table instead of opening the viewer
    #[arg(long)]
    bench: bool,
}

fn load_scene(path: &PathBuf) -> Result<SceneConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let cfg: SceneConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_gravity();
        return Ok(());
    }

    let cfg = match &args.scene {
        Some(path) => load_scene(path)?,
        None => SceneConfig::default(),
    };

    let simulation = Simulation::build(cfg);
    let store = TemplateStore::load_file(&args.templates)?;

    run_viewer(simulation, store, args.templates);

    Ok(())
}
