use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use good_vibes::{escape_html, render_template, repo_card, Controller, Repo};
use serde_json::json;

fn sample_repo(topics: usize) -> Repo {
    serde_json::from_value(json!({
        "name": "good-vibes",
        "html_url": "https://example.com/good-vibes",
        "language": "Rust",
        "stargazers_count": 128,
        "description": "A single-page site with <em>plenty</em> of \"unsafe\" input",
        "topics": (0..topics).map(|i| format!("topic-{i}")).collect::<Vec<_>>(),
        "updated_at": "2025-01-03T10:00:00Z"
    }))
    .expect("sample repo record")
}

fn bench_escape(c: &mut Criterion) {
    const INPUTS: &[(&str, &str)] = &[
        ("clean", "a perfectly ordinary description of a repository"),
        ("hostile", "<script>alert(\"xss\")</script> & `friends` = /danger/"),
    ];
    for &(label, input) in INPUTS {
        c.bench_with_input(BenchmarkId::new("escape_html", label), &input, |b, &input| {
            b.iter(|| black_box(escape_html(input)));
        });
    }
}

fn bench_template(c: &mut Criterion) {
    let template = "<article><h3>{{title}}</h3><p>{{excerpt}}</p><span>{{date}}</span></article>";
    let data = [
        ("title", "Good vibes only"),
        ("excerpt", "A <short> excerpt with \"quotes\""),
        ("date", "January 3, 2025"),
    ];
    c.bench_function("render_template", |b| {
        b.iter(|| black_box(render_template(template, &data)));
    });
}

fn bench_cards(c: &mut Criterion) {
    for topics in [0usize, 3, 12] {
        let repo = sample_repo(topics);
        c.bench_with_input(
            BenchmarkId::new("repo_card", topics),
            &repo,
            |b, repo| {
                b.iter(|| black_box(repo_card(repo)));
            },
        );
    }
}

fn bench_page_cycle(c: &mut Criterion) {
    c.bench_function("mount_navigate_render", |b| {
        b.iter(|| {
            let mut controller = Controller::new();
            controller.navigate_to("repositories");
            controller.navigate_to("articles");
            black_box(controller.document().to_html());
        });
    });
}

criterion_group!(
    benches,
    bench_escape,
    bench_template,
    bench_cards,
    bench_page_cycle
);
criterion_main!(benches);
