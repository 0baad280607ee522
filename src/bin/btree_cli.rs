//! Simple CLI for inspecting bulk-loaded trees.
//!
//! Every command builds a `BTree<u64, u64, 256>` from `count` generated
//! pairs `(i * step, i)`, then queries it.
//!
//! Usage:
//!   btree_cli stats <count> [step]
//!   btree_cli find <count> <key> [step]
//!   btree_cli range <count> <lo> <hi> [step]
//!   btree_cli equal <count> <key> [step]
//!   btree_cli debug <count> <key> [step]
//!   btree_cli export <count> [step]
//!   btree_cli layout

use bulk_btree::{BTree, LayoutInfo};
use std::env;
use std::process::exit;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliTree = BTree<u64, u64, 256>;

fn usage() -> ! {
    eprintln!("Usage: btree_cli <command> [args...]");
    eprintln!("Commands:");
    eprintln!("  stats <count> [step]            - Build a tree and show statistics");
    eprintln!("  find <count> <key> [step]       - Look up a key");
    eprintln!("  range <count> <lo> <hi> [step]  - Scan keys in [lo, hi)");
    eprintln!("  equal <count> <key> [step]      - Show all pairs with a key");
    eprintln!("  debug <count> <key> [step]      - Trace the descent for a key");
    eprintln!("  export <count> [step]           - Print the tree structure as JSON");
    eprintln!("  layout                          - Show node layouts for u64 pairs");
    exit(1);
}

fn parse_arg(args: &[String], index: usize, name: &str) -> u64 {
    let Some(raw) = args.get(index) else {
        usage();
    };
    match raw.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("ERROR: Invalid {}: {}", name, raw);
            exit(1);
        }
    }
}

fn parse_step(args: &[String], index: usize) -> u64 {
    if args.len() > index {
        parse_arg(args, index, "step")
    } else {
        1
    }
}

fn build(count: u64, step: u64) -> CliTree {
    let start = std::time::Instant::now();
    let input = (0..count).map(|i| (i.saturating_mul(step), i));
    let tree = match CliTree::bulkload(input) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("ERROR: Failed to build tree: {}", e);
            exit(1);
        }
    };
    tracing::info!(
        size = tree.size(),
        height = tree.height(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "tree built"
    );
    tree
}

fn print_layout(info: &LayoutInfo) {
    println!(
        "node_size: {:>5}  leaf_capacity: {:>4}  inner_capacity: {:>4}  leaf_bytes: {:>5}  inner_bytes: {:>5}",
        info.node_size, info.leaf_capacity, info.inner_capacity, info.leaf_bytes, info.inner_bytes
    );
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bulk_btree=info,btree_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1) else {
        usage();
    };

    match command.as_str() {
        "stats" => {
            let tree = build(parse_arg(&args, 2, "count"), parse_step(&args, 3));
            let stats = tree.stats();
            println!("size: {}", stats.size);
            println!("height: {}", stats.height);
            println!("leaf_count: {}", stats.leaf_count);
            println!("inner_count: {}", stats.inner_count);
            print_layout(&stats.layout);
        }

        "find" => {
            let tree = build(parse_arg(&args, 2, "count"), parse_step(&args, 4));
            let key = parse_arg(&args, 3, "key");
            match tree.get(tree.find(&key)) {
                Some((k, v)) => println!("{} -> {}", k, v),
                None => println!("NOT_FOUND"),
            }
        }

        "range" => {
            let tree = build(parse_arg(&args, 2, "count"), parse_step(&args, 5));
            let lo = parse_arg(&args, 3, "lo");
            let hi = parse_arg(&args, 4, "hi");
            let range = tree.find_range(&lo, &hi);
            println!("COUNT: {}", range.len());
            for (k, v) in range {
                println!("{} -> {}", k, v);
            }
        }

        "equal" => {
            let tree = build(parse_arg(&args, 2, "count"), parse_step(&args, 4));
            let key = parse_arg(&args, 3, "key");
            let range = tree.equal_range(&key);
            println!("COUNT: {}", range.len());
            for (k, v) in range {
                println!("{} -> {}", k, v);
            }
        }

        "debug" => {
            let tree = build(parse_arg(&args, 2, "count"), parse_step(&args, 4));
            let key = parse_arg(&args, 3, "key");
            for line in tree.debug_find(&key) {
                println!("{}", line);
            }
        }

        "export" => {
            let tree = build(parse_arg(&args, 2, "count"), parse_step(&args, 3));
            match serde_json::to_string_pretty(&tree.export_tree()) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("ERROR: Failed to serialize tree: {}", e);
                    exit(1);
                }
            }
        }

        "layout" => {
            print_layout(&BTree::<u64, u64, 64>::layout());
            print_layout(&BTree::<u64, u64, 128>::layout());
            print_layout(&BTree::<u64, u64, 256>::layout());
            print_layout(&BTree::<u64, u64, 1024>::layout());
            print_layout(&BTree::<u64, u64, 4096>::layout());
        }

        _ => {
            eprintln!("Unknown command: {}", command);
            exit(1);
        }
    }
}
