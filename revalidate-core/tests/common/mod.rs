#![allow(dead_code)]

use revalidate_core::{HeaderList, Request, Response, Verb};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRequest {
    pub verb: Verb,
    pub uri: String,
    pub headers: HeaderList,
    pub proxy: Option<String>,
    pub body: Vec<u8>,
    pub version: &'static str,
}

impl TestRequest {
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            uri: "https://example.com/resource".to_owned(),
            headers: HeaderList::new(),
            proxy: None,
            body: Vec::new(),
            version: "1.1",
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        use revalidate_core::Headers;
        self.headers.add(name, value);
        self
    }
}

impl Request for TestRequest {
    type Uri = String;
    type Headers = HeaderList;
    type Body = Vec<u8>;
    type Version = &'static str;
    type Proxy = String;

    fn verb(&self) -> &Verb {
        &self.verb
    }

    fn uri(&self) -> &String {
        &self.uri
    }

    fn headers(&self) -> &HeaderList {
        &self.headers
    }

    fn body(&self) -> &Vec<u8> {
        &self.body
    }

    fn proxy(&self) -> Option<&String> {
        self.proxy.as_ref()
    }

    fn version(&self) -> &&'static str {
        &self.version
    }

    fn from_parts(
        verb: Verb,
        uri: String,
        headers: HeaderList,
        proxy: Option<String>,
        body: Vec<u8>,
        version: &'static str,
    ) -> Self {
        Self {
            verb,
            uri,
            headers,
            proxy,
            body,
            version,
        }
    }
}

pub struct TestResponse {
    pub headers: HeaderList,
}

impl TestResponse {
    pub fn with_headers(headers: &[(&str, &str)]) -> Self {
        Self {
            headers: headers.iter().copied().collect(),
        }
    }
}

impl Response for TestResponse {
    type Headers = HeaderList;

    fn headers(&self) -> &HeaderList {
        &self.headers
    }
}

pub const ALL_VERBS: [Verb; 9] = [
    Verb::Get,
    Verb::Head,
    Verb::Post,
    Verb::Put,
    Verb::Delete,
    Verb::Patch,
    Verb::Options,
    Verb::Trace,
    Verb::Connect,
];
