use syntagma::{Analysis, Category, Chunk, ChunkStats, MergeMetrics};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Settings echoed in the report header.
pub struct RunSummary {
    pub level2: bool,
    pub multi_pass: bool,
    pub max_passes: usize,
    pub rule_count: usize,
}

pub fn print_run(analyses: &[Analysis<'_>], summary: &RunSummary, show_events: bool, color: bool) {
    let palette = ansi::Palette::new(color);
    println!(
        "{}",
        palette.bold(palette.paint(format!("⚙  Chunking {} sentence(s)", analyses.len()), ansi::CYAN))
    );
    println!(
        "  {} {}  │  {} {}  │  {} {}",
        palette.dim("level 2:"),
        on_off(summary.level2),
        palette.dim("multi-pass:"),
        if summary.multi_pass { format!("on (max {})", summary.max_passes) } else { "off".to_string() },
        palette.dim("rules:"),
        summary.rule_count,
    );

    let mut level1 = ChunkStats::default();
    let mut level2 = ChunkStats::default();

    for analysis in analyses {
        level1.add(&analysis.level1);
        level2.add(&analysis.level2);

        let sentence = analysis.sentence;
        println!("\n{}", palette.paint(format!("━━━ {} ━━━", sentence.sent_id), ansi::GRAY));
        println!("{}", palette.dim(&sentence.text));
        println!("  {} {}", palette.paint("L1", ansi::BLUE), fmt_chunks(&analysis.level1, &palette));
        if summary.level2 {
            println!("  {} {}", palette.paint("L2", ansi::GREEN), fmt_chunks(&analysis.level2, &palette));
            print_passes(&analysis.metrics, show_events, &palette);
        }
    }

    println!("\n{}", palette.paint("━━━ Statistics ━━━", ansi::GRAY));
    print_stats("Level 1", &level1, &palette);
    if summary.level2 {
        print_stats("Level 2", &level2, &palette);
        let (removed, percent) = level1.reduction(&level2);
        println!(
            "  {} {} ({})",
            palette.dim("reduction:"),
            palette.paint(removed.to_string(), ansi::GREEN),
            palette.paint(format!("{percent:.1}%"), ansi::YELLOW),
        );
    }
    println!();
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn print_passes(metrics: &MergeMetrics, show_events: bool, palette: &ansi::Palette) {
    let status = if metrics.converged {
        palette.paint("converged", ansi::GREEN)
    } else {
        palette.paint("not converged", ansi::YELLOW)
    };
    println!(
        "     {} {}  {} {}  {} {:?}",
        palette.dim("passes:"),
        metrics.pass_count(),
        palette.dim("merges:"),
        metrics.total_merges,
        status,
        metrics.total,
    );

    if !show_events {
        return;
    }
    for event in metrics.events() {
        println!(
            "       {} {} {} {}",
            palette.paint(format!("p{}@{}", event.pass, event.position), ansi::YELLOW),
            palette.paint(&event.rule_id, ansi::CYAN),
            palette.dim(format!("({} → 1)", event.consumed)),
            event.text,
        );
    }
}

fn print_stats(label: &str, stats: &ChunkStats, palette: &ansi::Palette) {
    println!(
        "  {} {} chunks  │  {} tokens  │  {} tokens/chunk",
        palette.paint(format!("{label}:"), ansi::BLUE),
        stats.chunks,
        stats.tokens,
        palette.paint(format!("{:.2}", stats.tokens_per_chunk()), ansi::GREEN),
    );
    let counts: Vec<String> = Category::ALL
        .iter()
        .filter(|&&c| stats.count(c) > 0)
        .map(|&c| format!("{}={}", c, stats.count(c)))
        .collect();
    if !counts.is_empty() {
        println!("    {}", palette.dim(counts.join(" ")));
    }
}

fn fmt_chunks(chunks: &[Chunk<'_>], palette: &ansi::Palette) -> String {
    chunks
        .iter()
        .map(|chunk| {
            let label = palette.paint(format!("[{}]", chunk.category()), color_for(chunk.category()));
            format!("{} {}", label, chunk.text())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn color_for(category: Category) -> &'static str {
    match category {
        Category::VerbPhrase => ansi::GREEN,
        Category::NounPhrase => ansi::BLUE,
        Category::PrepPhrase => ansi::CYAN,
        Category::SubjectPronoun | Category::ObjectPronoun => ansi::MAGENTA,
        Category::Punct => ansi::GRAY,
        _ => ansi::YELLOW,
    }
}
