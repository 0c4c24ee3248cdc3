// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use omnibar::store::DraftFolder;
use omnibar::submit::generate_post_content;

mod fixtures;
mod profiler;

use fixtures::{Case, TempDir};

const DRAFT: &str = "omnibar_v2_post";

// Benchmark identity (keep stable):
// - Group names in this file: `store.draft`, `submit.content`
// - Case IDs must remain stable across refactors (e.g. `save_small`, `load_large_images`).
fn benches_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store.draft");

    for (case, suffix) in [
        (Case::Small, "small"),
        (Case::Medium, "medium"),
        (Case::LargeImages, "large_images"),
    ] {
        let regions = fixtures::composition(case).regions().to_vec();

        let save_regions = regions.clone();
        group.bench_function(format!("save_{suffix}"), move |b| {
            b.iter_batched_ref(
                || TempDir::new(&format!("store_draft_save_{suffix}")),
                |tmp| {
                    let folder = DraftFolder::new(tmp.path());
                    folder
                        .save_draft(DRAFT, black_box(&save_regions))
                        .expect("save_draft");
                    let path = folder.draft_path(DRAFT).expect("draft_path");
                    black_box(std::fs::metadata(path).expect("draft metadata").len())
                },
                BatchSize::SmallInput,
            )
        });

        let tmp = TempDir::new(&format!("store_draft_load_{suffix}"));
        let folder = DraftFolder::new(tmp.path());
        folder.save_draft(DRAFT, &regions).expect("save_draft");
        group.bench_function(format!("load_{suffix}"), move |b| {
            let _keep = &tmp;
            b.iter(|| {
                let loaded = folder.load_draft(DRAFT).expect("load_draft");
                black_box(loaded.map(|regions| regions.len()).unwrap_or(0))
            })
        });
    }

    group.finish();

    let mut group = c.benchmark_group("submit.content");
    for (case, suffix) in [(Case::Small, "small"), (Case::Medium, "medium")] {
        let composition = fixtures::composition(case);
        group.bench_function(format!("generate_{suffix}"), |b| {
            b.iter(|| {
                let content =
                    generate_post_content(black_box(composition.regions())).expect("content");
                black_box(content.len())
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_store
}
criterion_main!(benches);
