//! Benchmark for autoaim resolution
//!
//! Measures a full sweep of resolutions from the middle of a stepped hall
//! whose ceiling is a portal into a loft, and a single diagonal resolution.

use aim::{AimRequest, Resolver};
use criterion::{criterion_group, criterion_main, Criterion};
use geom::{Angle, Fixed};
use glam::{DVec2, DVec3};
use map::{ActorDef, Level, LevelBuilder, LineDef, PortalDef, RegionDef};
use std::hint::black_box;

/// 1024-unit hall split into strips of alternating floor height
fn create_hall(strips: usize) -> Level {
    let width = 1024.0 / strips as f64;
    let mut builder = LevelBuilder::new("hall")
        .portal(PortalDef::new("up", 1, DVec3::new(0.0, 4096.0, 0.0)))
        .region(
            RegionDef::rect("loft", DVec2::new(-512.0, 3584.0), DVec2::new(512.0, 4608.0), 128.0, 512.0)
                .group(1),
        );

    for i in 0..strips {
        let x0 = -512.0 + width * i as f64;
        let floor = if i % 2 == 0 { 0.0 } else { 16.0 };
        builder = builder.region(
            RegionDef::rect(
                format!("strip{i}"),
                DVec2::new(x0, -512.0),
                DVec2::new(x0 + width, 512.0),
                floor,
                128.0,
            )
            .ceiling_portal("up"),
        );
        if i > 0 {
            builder = builder.line(
                LineDef::new(DVec2::new(x0, 512.0), DVec2::new(x0, -512.0), format!("strip{}", i - 1))
                    .back(format!("strip{i}")),
            );
        }
    }

    builder = builder.actor(ActorDef::new("player", DVec3::new(8.0, 8.0, 16.0)).player());
    for i in 0..32 {
        let a = i as f64 * std::f64::consts::TAU / 32.0;
        builder = builder.actor(ActorDef::new(
            format!("imp{i}"),
            DVec3::new(400.0 * a.cos(), 4096.0 + 400.0 * a.sin(), 128.0),
        ));
    }
    builder.build().expect("Failed to build bench level")
}

fn bench_sweep(c: &mut Criterion) {
    let level = create_hall(32);
    let resolver = Resolver::with_defaults(&level);
    let source = level.actor_id("player").expect("player exists");

    c.bench_function("resolve_sweep_64", |b| {
        b.iter(|| {
            for step in 0..64u32 {
                let result = resolver.resolve(&AimRequest {
                    source,
                    angle: Angle(step.wrapping_mul(u32::MAX / 64)),
                    range: Fixed::from_int(1024),
                    mask: true,
                });
                black_box(result);
            }
        })
    });
}

fn bench_single(c: &mut Criterion) {
    let level = create_hall(32);
    let resolver = Resolver::with_defaults(&level);
    let request = AimRequest {
        source: level.actor_id("player").expect("player exists"),
        angle: Angle::ANG45,
        range: Fixed::from_int(2048),
        mask: true,
    };

    c.bench_function("resolve_single", |b| {
        b.iter(|| black_box(resolver.resolve(black_box(&request))))
    });
}

criterion_group!(benches, bench_sweep, bench_single);
criterion_main!(benches);
