use argh::FromArgs;
use glam::{DQuat, DVec3};
use std::path::PathBuf;

use kornia_pose::{
    InterpolationConfig, OutOfRangePolicy, RigidTransform, TimedPose, Trajectory,
};

#[derive(FromArgs)]
/// Sample a pose trajectory at the requested times and print the poses as JSON
struct Args {
    /// path to a JSON array of timed poses, a built-in quarter turn is used if missing
    #[argh(option, short = 't')]
    trajectory: Option<PathBuf>,

    /// query time, may be repeated
    #[argh(option, short = 'q')]
    query: Vec<f64>,

    /// number of evenly spaced samples when no query time is given
    #[argh(option, short = 'n', default = "5")]
    num_samples: usize,

    /// clamp query times outside the trajectory instead of rejecting them
    #[argh(switch)]
    clamp: bool,
}

fn default_trajectory() -> Result<Vec<TimedPose>, Box<dyn std::error::Error>> {
    let end = RigidTransform::new(
        DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2),
        DVec3::ONE,
    )?;
    Ok(vec![
        TimedPose::new(0.0, RigidTransform::IDENTITY),
        TimedPose::new(1.0, end),
    ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let poses = match &args.trajectory {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => default_trajectory()?,
    };
    let trajectory = Trajectory::new(poses)?;
    let (start, end) = trajectory.time_range();
    log::info!(
        "loaded {} poses spanning [{start}, {end}]",
        trajectory.len()
    );

    let queries = if args.query.is_empty() {
        let n = args.num_samples.max(2);
        (0..n)
            .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
            .collect()
    } else {
        args.query.clone()
    };

    let config = InterpolationConfig {
        out_of_range: if args.clamp {
            OutOfRangePolicy::Clamp
        } else {
            OutOfRangePolicy::Reject
        },
        ..Default::default()
    };

    let mut failed = false;
    for t in queries {
        match trajectory.sample_with_config(t, &config) {
            Ok(pose) => println!("{}", serde_json::to_string(&TimedPose::new(t, pose))?),
            Err(err) => {
                log::warn!("skipping query {t}: {err}");
                failed = true;
            }
        }
    }

    if failed {
        return Err("some query times could not be sampled".into());
    }

    Ok(())
}
