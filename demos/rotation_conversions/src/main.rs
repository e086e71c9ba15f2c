use argh::FromArgs;
use glam::{DMat3, DVec3};

use kornia_pose::rotation::{
    from_axis_angle, is_rotation, orthonormalize, to_axis_angle, to_euler, to_quaternion,
    OrthonormalizeMethod,
};
use kornia_pose::{EulerConvention, EulerOrder};

#[derive(FromArgs)]
/// Convert an axis-angle rotation to every other representation and repair a drifted copy
struct Args {
    /// rotation axis as three comma separated values
    #[argh(option, short = 'a', default = "String::from(\"0,0,1\")")]
    axis: String,

    /// rotation angle in degrees
    #[argh(option, short = 'd', default = "90.0")]
    degrees: f64,

    /// euler sequence such as zyx or zxz
    #[argh(option, short = 'o', default = "String::from(\"zyx\")")]
    order: String,

    /// magnitude of the perturbation added before re-orthonormalizing
    #[argh(option, default = "1e-3")]
    drift: f64,
}

fn parse_axis(s: &str) -> Result<DVec3, Box<dyn std::error::Error>> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()?;
    match values.as_slice() {
        [x, y, z] => Ok(DVec3::new(*x, *y, *z)),
        _ => Err(format!("expected three axis components, got {}", values.len()).into()),
    }
}

fn parse_order(s: &str) -> Result<EulerOrder, Box<dyn std::error::Error>> {
    EulerOrder::ALL
        .into_iter()
        .find(|order| format!("{order:?}").eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown euler sequence {s}").into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let axis = parse_axis(&args.axis)?;
    let order = parse_order(&args.order)?;
    let r = from_axis_angle(axis, args.degrees.to_radians())?;

    println!("Rotation matrix:\n{r}");

    let q = to_quaternion(&r);
    println!("Quaternion (w, x, y, z): ({}, {}, {}, {})", q.w, q.x, q.y, q.z);

    let aa = to_axis_angle(&r);
    println!(
        "Axis-angle: axis {} angle {} deg",
        aa.axis,
        aa.angle.to_degrees()
    );

    for convention in [EulerConvention::Intrinsic, EulerConvention::Extrinsic] {
        let euler = to_euler(&r, order, convention);
        let [a, b, c] = euler.angles.map(f64::to_degrees);
        println!("Euler {order:?} {convention:?} (deg): ({a}, {b}, {c})");
    }

    // a small skew-free perturbation breaks orthogonality
    let drifted = r + DMat3::from_diagonal(DVec3::new(1.0, -0.5, 0.25) * args.drift);
    log::info!("drifted matrix is a rotation: {}", is_rotation(&drifted, 1e-9));

    for method in [
        OrthonormalizeMethod::Quaternion,
        OrthonormalizeMethod::Svd,
        OrthonormalizeMethod::Cholesky,
    ] {
        match orthonormalize(&drifted, method) {
            Ok(repaired) => {
                let err = (repaired * repaired.transpose() - DMat3::IDENTITY)
                    .to_cols_array()
                    .iter()
                    .fold(0.0f64, |acc, v| acc.max(v.abs()));
                println!(
                    "{method:?}: max |R*R^T - I| = {err:e}, det = {}, distance to input = {:e}",
                    repaired.determinant(),
                    (repaired - r)
                        .to_cols_array()
                        .iter()
                        .fold(0.0f64, |acc, v| acc.max(v.abs()))
                );
            }
            Err(err) => log::warn!("{method:?} failed: {err}"),
        }
    }

    Ok(())
}
