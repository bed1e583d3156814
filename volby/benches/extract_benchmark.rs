use criterion::{criterion_group, criterion_main, Criterion};
use scrape::discover::find_links;
use scrape::document::Page;
use scrape::extract::extract_from_page;
use url::Url;
use volby::compiled_canonical_schema;

const REGION_URL : &str = "https://www.volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=12&xobec=589268&xvyber=7103";

fn parse_index(c: &mut Criterion) {
    let schema = compiled_canonical_schema().unwrap();
    let text = include_str!("../tests/data/ps32_index.html");
    c.bench_function("Find links on district index", |b| b.iter(|| find_links(&Page::parse(text),&schema)));
}

fn extract_municipality(c: &mut Criterion) {
    let schema = compiled_canonical_schema().unwrap();
    let url = Url::parse(REGION_URL).unwrap();
    let text = include_str!("../tests/data/ps311_589268.html");
    c.bench_function("Extract municipality record", |b| b.iter(|| extract_from_page(&Page::parse(text),&url,&schema)));
}

criterion_group!(benches, parse_index,extract_municipality);
criterion_main!(benches);
