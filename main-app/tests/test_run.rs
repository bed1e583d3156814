// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use std::path::Path;
use clap::Parser;
use main_app::{run_with_fetcher, Opts};
use scrape::download::MemoryFetcher;

const INDEX_URL : &str = "https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=4&xnumnuts=3203";

fn index(codes:&[&str]) -> String {
    let rows : String = codes.iter().map(|c|format!(r#"<tr><td class="cislo" headers="t1sa1 t1sb1"><a href="ps311?xjazyk=CZ&amp;xobec={}">{}</a></td></tr>"#,c,c)).collect();
    format!(r#"<html><body><table class="table">{}</table></body></html>"#,rows)
}

fn region(name:&str,party_votes:&str) -> String {
    format!(r#"<html><body><h3>Okres: Prostějov</h3><h3>Obec: {}</h3>
<table class="table" id="ps311_t1"><tr><th>x</th></tr><tr><td headers="sa2">100</td><td headers="sa3">60</td><td headers="sa6">59</td></tr></table>
<table class="table"><tr><th>Strana</th></tr><tr><th>název</th></tr><tr><td>1</td><td>ANO 2011</td><td>{}</td></tr></table>
</body></html>"#,name,party_votes)
}

fn region_url(code:&str) -> String { format!("https://www.volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xobec={}",code) }

fn opts(output:&Path,extra:&[&str]) -> Opts {
    let output = output.to_string_lossy().to_string();
    let mut args = vec!["volby_scrape",INDEX_URL,"--output",output.as_str()];
    args.extend_from_slice(extra);
    Opts::parse_from(args)
}

#[test]
fn writes_csv_with_one_row_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("results").join("prostejov.csv");
    let fetcher = MemoryFetcher::default()
        .with_page(INDEX_URL,&index(&["1","2","3"]))
        .with_page(&region_url("1"),&region("Alojzov","10"))
        .with_page(&region_url("2"),&region("Bedihošť","1&nbsp;001"));
    let report = run_with_fetcher(&opts(&output,&["--missing","N/A"]),&fetcher).unwrap();
    assert_eq!(1,report.skipped_count());
    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!("region_code,region_name,registered_voters,issued_envelopes,valid_votes,ANO 2011\n1,Alojzov,100,60,59,10\n2,Bedihošť,100,60,59,1001\n",text);
}

#[test]
fn no_links_is_an_error_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let fetcher = MemoryFetcher::default().with_page(INDEX_URL,"<html><body><p>Nothing here</p></body></html>");
    let err = run_with_fetcher(&opts(&output,&[]),&fetcher).unwrap_err();
    assert!(err.to_string().contains("No matching links"),"{}",err);
    assert!(!output.exists());
}

#[test]
fn no_records_is_an_error_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let fetcher = MemoryFetcher::default()
        .with_page(INDEX_URL,&index(&["1"]))
        .with_page(&region_url("1"),"<html><body><h3>Obec: Alojzov</h3></body></html>");
    let err = run_with_fetcher(&opts(&output,&[]),&fetcher).unwrap_err();
    assert!(err.to_string().contains("No data extracted"),"{}",err);
    assert!(!output.exists());
}

#[test]
fn index_failure_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let err = run_with_fetcher(&opts(&output,&[]),&MemoryFetcher::default()).unwrap_err();
    assert!(format!("{:#}",err).contains("404"),"{:#}",err);
    assert!(!output.exists());
}

#[test]
fn schema_with_bad_selector_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut schema = volby::canonical_schema().unwrap();
    schema.region.party_table_selector = "table[".to_string();
    let schema_path = dir.path().join("layout.json");
    std::fs::write(&schema_path,serde_json::to_string(&schema).unwrap()).unwrap();
    let output = dir.path().join("out.csv");
    let schema_arg = schema_path.to_string_lossy().to_string();
    let fetcher = MemoryFetcher::default().with_page(INDEX_URL,&index(&["1"]));
    let err = run_with_fetcher(&opts(&output,&["--schema",schema_arg.as_str()]),&fetcher).unwrap_err();
    assert!(err.to_string().contains("Invalid selector"),"{}",err);
    assert!(fetcher.requests().is_empty());
}
