use std::{
    io::Write,
    net::TcpListener,
    path::Path,
    process::{Child, Command, Stdio},
    thread,
    time::Duration,
};

use tempfile::NamedTempFile;

/// A `bibhook serve` process, killed on drop.
struct Server {
    child: Child,
    base: String,
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .map(|a| a.port())
        .expect("free port")
}

fn start(output: &Path, words: &Path) -> Server {
    let port = free_port();
    let child = Command::new(assert_cmd::cargo::cargo_bin("bibhook"))
        .env("NO_COLOR", "1")
        .args(["serve", "--address", "127.0.0.1", "--port", &port.to_string(), "--output"])
        .arg(output)
        .arg("--dictionary")
        .arg(words)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn server");
    let server = Server {
        child,
        base: format!("http://127.0.0.1:{port}"),
    };

    for _ in 0..100 {
        if ureq::get(format!("{}/connector/ping", server.base)).call().is_ok() {
            return server;
        }
        thread::sleep(Duration::from_millis(100));
    }
    panic!("server did not come up on {}", server.base);
}

fn word_list() -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("tmp file");
    writeln!(tmp, "Newton\nmethod").unwrap();
    tmp
}

#[test]
fn handshake_carries_protocol_headers() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let words = word_list();
    let server = start(&dir.path().join("refs.bib"), words.path());

    let mut res = ureq::post(format!("{}/connector/ping", server.base)).send_empty()?;
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-zotero-version"], "5.0.25");
    assert_eq!(res.headers()["x-zotero-connector-api-version"], "2");
    let prefs: serde_json::Value = serde_json::from_str(&res.body_mut().read_to_string()?)?;
    assert_eq!(prefs["prefs"]["automaticSnapshots"], true);

    let res = ureq::post(format!("{}/connector/getSelectedCollection", server.base)).send_empty()?;
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-zotero-connector-api-version"], "2");

    let res = ureq::post(format!("{}/connector/saveSnapshot", server.base)).send("{}")?;
    assert_eq!(res.status(), 201);
    assert!(!dir.path().join("refs.bib").exists());
    Ok(())
}

#[test]
fn save_items_appends_one_record() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("refs.bib");
    let words = word_list();
    let server = start(&output, words.path());

    let body = r#"{"items":[{"itemType":"journalArticle","title":"A GMRES method for Newton iterations","creators":[{"firstName":"Youcef","lastName":"Saad"},{"firstName":"Martin","lastName":"Schultz"}],"publicationTitle":"SIAM J. Sci. Stat. Comput.","date":"1986","url":"https://example.org","accessDate":"2020-01-01","tags":[{"tag":"Krylov"}]}]}"#;
    let mut res = ureq::post(format!("{}/connector/saveItems", server.base))
        .header("Content-Type", "application/json")
        .send(body)?;
    assert_eq!(res.status(), 201);
    assert_eq!(res.headers()["x-zotero-version"], "5.0.25");
    assert_eq!(res.headers()["x-zotero-connector-api-version"], "2");
    assert_eq!(res.body_mut().read_to_string()?, body);

    let saved = std::fs::read_to_string(&output)?;
    assert_eq!(saved.matches("@article{").count(), 1);
    let (header, rest) = saved.split_once('\n').expect("header line");
    assert_eq!(header.len(), "@article{".len() + 6 + 1);
    assert_eq!(
        rest,
        " author = {Saad, Youcef and Schultz, Martin},\n journal = {SIAM J. Sci. Stat. Comput.},\n keywords = {Krylov},\n title = {A {GMRES} Method for {Newton} Iterations},\n year = {1986}\n}\n"
    );

    let bib = biblatex::Bibliography::parse(&saved).map_err(|e| e.to_string())?;
    assert_eq!(bib.len(), 1);
    Ok(())
}
