// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use arbiter_chess::board::{perft, Position};

const EXPECTED_NODES: [u64; 4] = [20, 400, 8_902, 197_281];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_startpos");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    let position = Position::default();

    for (depth_idx, expected) in EXPECTED_NODES.iter().enumerate() {
        let depth = (depth_idx + 1) as u32;

        // Correctness guard before benchmarking.
        assert_eq!(perft(&position, depth), *expected);

        group.throughput(Throughput::Elements(*expected));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("d{depth}")),
            expected,
            |b, expected| {
                b.iter(|| {
                    let nodes = perft(black_box(&position), black_box(depth));
                    assert_eq!(nodes, *expected);
                    black_box(nodes)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
