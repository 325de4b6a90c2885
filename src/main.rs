use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mpiam::{Action, EconomyEnv, Integrator, Method, RenderMode};

/// Run one episode of the environmental-economic model with randomly
/// sampled policies and render the outcome.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML parameter file
    #[arg(long, default_value = "parameters.yaml")]
    params: PathBuf,

    /// Number of steps to simulate
    #[arg(long, default_value_t = 1000)]
    steps: u64,

    /// Seed for action sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Integration method (dopri5 or rk23)
    #[arg(long, default_value = "dopri5")]
    method: Method,

    #[arg(long, default_value_t = mpiam::integrator::DEFAULT_TOLERANCE)]
    rtol: f64,

    #[arg(long, default_value_t = mpiam::integrator::DEFAULT_TOLERANCE)]
    atol: f64,

    /// Rendering written to stdout at the end (console or human)
    #[arg(long, default_value = "human")]
    render: RenderMode,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let integrator = Integrator::builder()
        .method(args.method)
        .rtol(args.rtol)
        .atol(args.atol)
        .build();
    let mut env = EconomyEnv::from_yaml_file(&args.params)
        .with_context(|| format!("loading parameters from {}", args.params.display()))?
        .with_integrator(integrator);

    let mut rng = fastrand::Rng::with_seed(args.seed);
    let space = env.action_space();
    env.reset();

    tracing::info!(steps = args.steps, seed = args.seed, "starting episode");
    let mut total_reward = 0.0;
    let mut faults = 0usize;
    for i in 0..args.steps {
        let action = Action::from(space.sample(&mut rng));
        let step = match env.step(&action) {
            Ok(step) => step,
            Err(e) => {
                tracing::error!(step = i + 1, "simulation stopped: {e}");
                break;
            }
        };
        total_reward += step.reward;
        faults += usize::from(step.info.reward_fault.is_some());
        if step.terminated {
            break;
        }
    }
    tracing::info!(
        completed = env.time(),
        total_reward,
        reward_faults = faults,
        "episode finished"
    );

    let stdout = std::io::stdout();
    env.render(args.render, &mut stdout.lock())
        .context("rendering trajectory")?;
    Ok(())
}
