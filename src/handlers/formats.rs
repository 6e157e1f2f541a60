//! Fixed inline payloads: `/deny`, `/robots.txt`, `/json`.

use axum::http::header;
use axum::response::{IntoResponse, Response};

const DENY_TEXT: &str = r#"
          .-''''''-.
        .' _      _ '.
       /   O      O   \
      :                :
      |                |
      :       __       :
       \  .--"  "--.  /
        '.          .'
          '-......-'
     YOU SHOULDN'T BE HERE
"#;

const ROBOTS_TXT: &str = "User-agent: *\nDisallow: /deny\n";

const SAMPLE_JSON: &str = r#"{
  "slideshow": {
    "author": "Yours Truly",
    "date": "date of publication",
    "slides": [
      {
        "title": "Wake up to WonderWidgets!",
        "type": "all"
      },
      {
        "items": [
          "Why <em>WonderWidgets</em> are great",
          "Who <em>buys</em> WonderWidgets"
        ],
        "title": "Overview",
        "type": "all"
      }
    ],
    "title": "Sample Slide Show"
  }
}
"#;

pub async fn deny() -> Response {
    ([(header::CONTENT_TYPE, "text/plain")], DENY_TEXT).into_response()
}

pub async fn robots_txt() -> Response {
    ([(header::CONTENT_TYPE, "text/plain")], ROBOTS_TXT).into_response()
}

pub async fn json() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], SAMPLE_JSON).into_response()
}
