use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{DMat3, DVec3};
use kornia_pose::rotation::{
    from_quaternion, orthonormalize, random_rotation, to_axis_angle, to_euler, to_quaternion,
    EulerConvention, EulerOrder, OrthonormalizeMethod,
};
use kornia_pose::{interpolate, RigidTransform, TimedPose, Trajectory};
use rand::Rng;

const DATA_SIZE: usize = 1000;

fn random_matrices() -> Vec<DMat3> {
    (0..DATA_SIZE)
        .filter_map(|_| from_quaternion(random_rotation()).ok())
        .collect()
}

fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversions");
    let rots = random_matrices();

    group.bench_function(BenchmarkId::new("to_quaternion", ""), |b| {
        b.iter(|| {
            for r in rots.iter() {
                std::hint::black_box(to_quaternion(std::hint::black_box(r)));
            }
        })
    });

    group.bench_function(BenchmarkId::new("to_axis_angle", ""), |b| {
        b.iter(|| {
            for r in rots.iter() {
                std::hint::black_box(to_axis_angle(std::hint::black_box(r)));
            }
        })
    });

    group.bench_function(BenchmarkId::new("to_euler", "zyx"), |b| {
        b.iter(|| {
            for r in rots.iter() {
                std::hint::black_box(to_euler(
                    std::hint::black_box(r),
                    EulerOrder::Zyx,
                    EulerConvention::Intrinsic,
                ));
            }
        })
    });

    group.finish();
}

fn bench_orthonormalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("orthonormalize");

    let mut rng = rand::rng();
    let drifted: Vec<DMat3> = random_matrices()
        .into_iter()
        .map(|r| {
            let noise = DVec3::new(rng.random(), rng.random(), rng.random()) * 1e-4;
            r + DMat3::from_diagonal(noise)
        })
        .collect();

    for (name, method) in [
        ("quaternion", OrthonormalizeMethod::Quaternion),
        ("svd", OrthonormalizeMethod::Svd),
        ("cholesky", OrthonormalizeMethod::Cholesky),
    ] {
        group.bench_with_input(BenchmarkId::new("method", name), &method, |b, &method| {
            b.iter(|| {
                for r in drifted.iter() {
                    let _ = std::hint::black_box(orthonormalize(std::hint::black_box(r), method));
                }
            })
        });
    }

    group.finish();
}

fn bench_interpolation(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolation");

    let poses: Vec<TimedPose> = (0..DATA_SIZE)
        .map(|i| TimedPose::new(i as f64, RigidTransform::from_random()))
        .collect();

    group.bench_function(BenchmarkId::new("interpolate", ""), |b| {
        b.iter(|| {
            for pair in poses.windows(2) {
                let t = pair[0].timestamp + 0.5;
                let _ = std::hint::black_box(interpolate(&pair[0], &pair[1], t));
            }
        })
    });

    if let Ok(trajectory) = Trajectory::new(poses.clone()) {
        let mut rng = rand::rng();
        let queries: Vec<f64> = (0..DATA_SIZE)
            .map(|_| rng.random::<f64>() * (DATA_SIZE - 1) as f64)
            .collect();

        for size in [10, 100, DATA_SIZE] {
            group.bench_with_input(BenchmarkId::new("trajectory_sample", size), &size, |b, &size| {
                b.iter(|| {
                    for t in queries.iter().take(size) {
                        let _ = std::hint::black_box(trajectory.sample(*t));
                    }
                })
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_conversions,
    bench_orthonormalize,
    bench_interpolation
);
criterion_main!(benches);
