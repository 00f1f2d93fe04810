// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use ahttp::{format_uri, FormBody, HttpCookie, UriArg};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn cookie_parsing_benchmark(c: &mut Criterion) {
    let headers = vec![
        "sid=abc123; Max-Age=3600; Path=/; Secure; HttpOnly",
        "theme=dark; Domain=example.com; Expires=Wed, 21 Oct 2015 07:28:00 GMT",
        "flag; SameSite=Lax",
    ];

    c.bench_function("parse_cookie", |b| {
        b.iter(|| {
            for header in &headers {
                black_box(HttpCookie::parse(header).ok());
            }
        })
    });
}

fn form_encoding_benchmark(c: &mut Criterion) {
    let mut form = FormBody::new("ISO-8859-1").unwrap();
    for i in 0..32 {
        form.add_parameter(format!("field{}", i), "José Silva & filhos").unwrap();
    }

    c.bench_function("encode_form", |b| b.iter(|| black_box(form.encode())));
}

fn uri_template_benchmark(c: &mut Criterion) {
    let args: Vec<UriArg> = vec!["a b/c".into(), UriArg::value(42)];

    c.bench_function("format_uri", |b| {
        b.iter(|| black_box(format_uri("/items/%s/parts/%d", &args).unwrap()))
    });
}

criterion_group!(benches, cookie_parsing_benchmark, form_encoding_benchmark, uri_template_benchmark);
criterion_main!(benches);
