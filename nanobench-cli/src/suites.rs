// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Compiled-in scenario suites.

use std::collections::{BTreeMap, HashMap, LinkedList, VecDeque};
use std::fmt::Write as _;
use std::hint::black_box;

use nanobench_core::Scenario;

const PUSH_COUNT: usize = 10_000;
const INSERT_COUNT: u64 = 1_000;
const FRAGMENTS: [&str; 8] = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta"];
const ESCAPE_SOURCE: &str = "<><><><>&&&&;;;;jl2kjlnnfljflksdjfuowu-9urjnl321knl;fu3poifuokbkvnl;uigufjslfjadsipuru1o2krn;lkmfzkjhvojopijkJ:LJKU)!*)($J!KLJOIFHS)JPJ";

/// A named group of scenarios measured against each other.
pub struct Suite {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> Vec<Scenario>,
}

impl Suite {
    /// Build fresh scenarios for one run.
    pub fn scenarios(&self) -> Vec<Scenario> {
        (self.build)()
    }
}

pub const SUITES: &[Suite] = &[
    Suite {
        name: "collections",
        description: "Vec vs VecDeque vs LinkedList push",
        build: collections,
    },
    Suite {
        name: "string",
        description: "push_str vs format! vs concat",
        build: string,
    },
    Suite {
        name: "escape",
        description: "HTML escaping strategies",
        build: escape,
    },
    Suite {
        name: "hash",
        description: "HashMap vs BTreeMap insert",
        build: hash,
    },
];

pub fn find(name: &str) -> Option<&'static Suite> {
    SUITES.iter().find(|s| s.name == name)
}

pub fn names() -> Vec<&'static str> {
    SUITES.iter().map(|s| s.name).collect()
}

fn collections() -> Vec<Scenario> {
    vec![
        Scenario::from_fn("Vec", || {
            let mut v = Vec::new();
            for i in 0..PUSH_COUNT {
                v.push(black_box(i));
            }
            v.len()
        }),
        Scenario::from_fn("VecDeque", || {
            let mut v = VecDeque::new();
            for i in 0..PUSH_COUNT {
                v.push_back(black_box(i));
            }
            v.len()
        }),
        Scenario::from_fn("LinkedList", || {
            let mut v = LinkedList::new();
            for i in 0..PUSH_COUNT {
                v.push_back(black_box(i));
            }
            v.len()
        }),
    ]
}

fn string() -> Vec<Scenario> {
    vec![
        Scenario::from_fn("push_str", || {
            let mut s = String::new();
            for f in black_box(FRAGMENTS) {
                s.push_str(f);
                s.push(',');
            }
            s
        }),
        Scenario::from_fn("format!", || {
            let mut s = String::new();
            for f in black_box(FRAGMENTS) {
                let _ = write!(s, "{},", f);
            }
            s
        }),
        Scenario::from_fn("concat", || {
            black_box(FRAGMENTS).iter().map(|f| format!("{f},")).collect::<Vec<_>>().concat()
        }),
    ]
}

fn escape() -> Vec<Scenario> {
    vec![
        Scenario::from_fn("str::replace", || escape_replace(black_box(ESCAPE_SOURCE))),
        Scenario::from_fn("char match", || escape_chars(black_box(ESCAPE_SOURCE))),
        Scenario::from_fn("byte scan", || escape_scan(black_box(ESCAPE_SOURCE))),
    ]
}

fn hash() -> Vec<Scenario> {
    vec![
        Scenario::from_fn("HashMap", || {
            let mut m = HashMap::new();
            for i in 0..INSERT_COUNT {
                m.insert(black_box(i), i);
            }
            m.len()
        }),
        Scenario::from_fn("BTreeMap", || {
            let mut m = BTreeMap::new();
            for i in 0..INSERT_COUNT {
                m.insert(black_box(i), i);
            }
            m.len()
        }),
    ]
}

fn escape_replace(src: &str) -> String {
    src.replace('&', "&amp;")
        .replace('>', "&gt;")
        .replace('<', "&lt;")
        .replace('\'', "&#39;")
        .replace('"', "&quot;")
}

fn entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '\'' => Some("&#39;"),
        '"' => Some("&quot;"),
        _ => None,
    }
}

fn escape_chars(src: &str) -> String {
    let mut out = String::with_capacity(src.len() + src.len() / 4);
    for c in src.chars() {
        match entity(c) {
            Some(e) => out.push_str(e),
            None => out.push(c),
        }
    }
    out
}

/// Copies unescaped runs in one slice and returns early when nothing needs escaping.
fn escape_scan(src: &str) -> String {
    let Some(first) = src.bytes().position(|b| entity(b as char).is_some()) else {
        return src.to_string();
    };

    let mut out = String::with_capacity(src.len() + src.len() / 4);
    out.push_str(&src[..first]);
    let mut start = first;
    for (i, b) in src.bytes().enumerate().skip(first) {
        // Entity bytes are all ASCII, so `i` is always a char boundary here.
        if let Some(e) = entity(b as char) {
            out.push_str(&src[start..i]);
            out.push_str(e);
            start = i + 1;
        }
    }
    out.push_str(&src[start..]);
    out
}
