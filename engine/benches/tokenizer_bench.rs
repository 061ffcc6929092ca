use criterion::{criterion_group, criterion_main, Criterion};
use engine::tokenizer::tokenize;

fn bench_tokenize(c: &mut Criterion) {
    let text = "Use a password manager; enable two-factor authentication (2FA) everywhere! \
                Χρησιμοποιήστε διαχειριστή κωδικών, ενεργοποιήστε έλεγχο ταυτότητας δύο παραγόντων. "
        .repeat(200);
    c.bench_function("tokenize_article", |b| b.iter(|| tokenize(&text)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
