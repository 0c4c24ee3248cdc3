// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::measurement::WallTime;
use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkGroup, Criterion, Throughput,
};

use omnibar::model::{
    editable_regions, normalize_regions, reorderable_regions, Bitmap, Composition, ImageRegion,
};
use omnibar::ops::{apply_ops, ApplyResult, EditOp, Op, ReorderOp};

mod fixtures;
mod profiler;

use fixtures::Case;

// Benchmark identity (keep stable):
// - Group names in this file: `ops.apply`, `sequence.build`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `delete_image_small`, `editable_medium`).
fn checksum_apply_result(result: &ApplyResult) -> u64 {
    let mut acc = 0u64;
    acc = acc.wrapping_mul(131).wrapping_add(result.new_rev);
    acc = acc.wrapping_mul(131).wrapping_add(result.applied as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.display.len() as u64);
    acc
}

fn reorder_cycle_ops(template: &Composition) -> Vec<Op> {
    let len = template.reorderable_regions().len();
    let mut ops = vec![Op::Reorder(ReorderOp::Begin)];
    if len > 1 {
        ops.push(Op::Reorder(ReorderOp::Move { from: 0, to: len - 1 }));
        ops.push(Op::Reorder(ReorderOp::Move { from: len / 2, to: 0 }));
    }
    ops.push(Op::Reorder(ReorderOp::End));
    ops
}

fn bench_apply(
    group: &mut BenchmarkGroup<'_, WallTime>,
    id: &str,
    template: &Composition,
    ops: Vec<Op>,
) {
    group.throughput(Throughput::Elements(ops.len() as u64));
    let template = template.clone();
    group.bench_function(id, move |b| {
        b.iter_batched(
            || template.clone(),
            |mut composition| {
                let base_rev = composition.rev();
                let result =
                    apply_ops(&mut composition, base_rev, black_box(&ops)).expect("apply_ops");
                black_box(checksum_apply_result(&result))
            },
            BatchSize::SmallInput,
        )
    });
}

fn benches_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops.apply");

    for (case, suffix) in [
        (Case::Small, "small"),
        (Case::Medium, "medium"),
        (Case::LargeImages, "large_images"),
    ] {
        let template = fixtures::composition(case);

        // Row 2 is the first image: every fixture starts with a text block.
        bench_apply(
            &mut group,
            &format!("delete_image_{suffix}"),
            &template,
            vec![Op::Edit(EditOp::DeleteRow { row: 2 })],
        );
        bench_apply(
            &mut group,
            &format!("append_image_{suffix}"),
            &template,
            vec![Op::Edit(EditOp::AppendImage {
                image: ImageRegion::new(Bitmap::new(4, 4, vec![7u8; 64])),
            })],
        );
        bench_apply(
            &mut group,
            &format!("update_text_{suffix}"),
            &template,
            vec![Op::Edit(EditOp::UpdateText {
                row: 0,
                text: "edited opening paragraph".to_owned(),
            })],
        );
        bench_apply(
            &mut group,
            &format!("reorder_cycle_{suffix}"),
            &template,
            reorder_cycle_ops(&template),
        );
        bench_apply(
            &mut group,
            &format!("prune_{suffix}"),
            &template,
            vec![Op::Edit(EditOp::PruneEmptyText)],
        );
    }

    group.finish();
}

fn benches_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence.build");

    for (case, suffix) in [
        (Case::Small, "small"),
        (Case::Medium, "medium"),
        (Case::LargeImages, "large_images"),
    ] {
        let raw = fixtures::regions(case);
        let canonical = normalize_regions(raw.clone());

        group.throughput(Throughput::Elements(canonical.len() as u64));
        group.bench_function(format!("editable_{suffix}"), |b| {
            b.iter(|| black_box(editable_regions(black_box(&canonical)).len()))
        });
        group.bench_function(format!("reorderable_{suffix}"), |b| {
            b.iter(|| black_box(reorderable_regions(black_box(&canonical)).len()))
        });

        group.throughput(Throughput::Elements(raw.len() as u64));
        group.bench_function(format!("normalize_{suffix}"), |b| {
            b.iter_batched(
                || raw.clone(),
                |regions| black_box(normalize_regions(regions).len()),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_ops, benches_sequence
}
criterion_main!(benches);
