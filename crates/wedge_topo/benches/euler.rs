use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use wedge_topo::{cube, from_polygon_soup};
use wedge_math::{Point3, Tolerance};

fn grid_soup(n: usize) -> Vec<Vec<Point3>> {
    let mut faces = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let (x, y) = (i as f64, j as f64);
            faces.push(vec![
                Point3::new(x, y, 0.0),
                Point3::new(x + 1.0, y, 0.0),
                Point3::new(x + 1.0, y + 1.0, 0.0),
                Point3::new(x, y + 1.0, 0.0),
            ]);
        }
    }
    faces
}

fn bench_construction(c: &mut Criterion) {
    c.bench_function("cube", |b| b.iter(|| black_box(cube(1.0).unwrap())));

    let soup = grid_soup(8);
    c.bench_function("grid_soup_8x8", |b| {
        b.iter(|| black_box(from_polygon_soup(&soup, Tolerance::DEFAULT).unwrap()))
    });
}

fn bench_validation(c: &mut Criterion) {
    let (mesh, _) = from_polygon_soup(&grid_soup(8), Tolerance::DEFAULT).unwrap();
    c.bench_function("validate_grid", |b| b.iter(|| mesh.validate().unwrap()));
    c.bench_function("manifold_grid", |b| b.iter(|| black_box(mesh.is_manifold())));
}

criterion_group!(benches, bench_construction, bench_validation);
criterion_main!(benches);
