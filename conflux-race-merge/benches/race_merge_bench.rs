use conflux_core::from_stream;
use conflux_race_merge::RaceMergeExt;
use criterion::{BenchmarkId, Criterion, Throughput};
use futures::stream;
use futures::StreamExt;
use std::hint::black_box;
use tokio::runtime::Runtime;

fn make_source(size: usize, payload_size: usize) -> Vec<Vec<u8>> {
    (0..size).map(|_| vec![0u8; payload_size]).collect()
}

pub fn bench_race_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("race_merge");
    let sizes = [1000usize, 10_000usize];
    let payload_sizes = [0usize, 128usize];

    for &size in &sizes {
        for &payload_size in &payload_sizes {
            let id = BenchmarkId::from_parameter(format!("merge_m{}_p{}", size, payload_size));
            group.throughput(Throughput::Elements((size * 3) as u64));
            group.bench_with_input(
                id,
                &(size, payload_size),
                |bencher, &(size, payload_size)| {
                    bencher.iter(|| {
                        let merged = vec![
                            from_stream(stream::iter(make_source(size, payload_size))),
                            from_stream(stream::iter(make_source(size, payload_size))),
                            from_stream(stream::iter(make_source(size, payload_size))),
                        ]
                        .race_merge();

                        let rt = Runtime::new().unwrap();
                        rt.block_on(async move {
                            let mut merged = Box::pin(merged);
                            while let Some(emission) = merged.next().await {
                                black_box(emission);
                            }
                        });
                    })
                },
            );
        }
    }

    group.finish();
}
