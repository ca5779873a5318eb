//! Forward-scan results shared by the probes of one lexer.
//!
//! Several probes look ahead for a terminator that may never come (an
//! unclosed `[warn]`, a stray `*`). Without memory each opener rescans to
//! the end of input. Because a lexer only moves forward, a failed scan
//! from offset `p` also answers every later probe that would cover the
//! same ground.

use std::collections::HashMap;

use crate::parsing::kinds::Bbtag;

#[derive(Default)]
pub(super) struct ScanMemo<'a> {
    /// Built on first use per directive name.
    closers: HashMap<&'a str, CloserIndex>,
    /// Per emphasis delimiter: bodies starting in `from..=until` never close.
    unclosed_emphasis: HashMap<&'static str, (usize, usize)>,
    /// Per terminator: absent at or after this offset.
    missing: HashMap<&'static str, usize>,
}

impl<'a> ScanMemo<'a> {
    /// Offset of the `[/name]` that closes a body starting at `body_start`.
    pub(super) fn closer(
        &mut self,
        text: &'a str,
        name: &'a str,
        body_start: usize,
    ) -> Option<usize> {
        self.closers
            .entry(name)
            .or_insert_with(|| CloserIndex::build(text, name))
            .closer_for(body_start)
    }

    pub(super) fn emphasis_unclosed(&self, delim: &'static str, body_start: usize) -> bool {
        self.unclosed_emphasis
            .get(delim)
            .is_some_and(|&(from, until)| (from..=until).contains(&body_start))
    }

    pub(super) fn record_unclosed_emphasis(
        &mut self,
        delim: &'static str,
        from: usize,
        until: usize,
    ) {
        self.unclosed_emphasis.insert(delim, (from, until));
    }

    /// Like `rest.find(pat)` for the text starting at local offset `at`.
    pub(super) fn find(&mut self, rest: &str, at: usize, pat: &'static str) -> Option<usize> {
        if self.missing.get(pat).is_some_and(|&from| from <= at) {
            return None;
        }
        let found = rest.find(pat);
        if found.is_none() {
            self.missing.insert(pat, at);
        }
        found
    }
}

/// Same-name directive openers and closers of one input, matched the way a
/// forward scan with a nesting counter would match them.
struct CloserIndex {
    /// Offsets of every opener and closer, in order.
    offsets: Vec<usize>,
    /// `closers[g]`: closer of a body that starts after the first `g`
    /// entries of `offsets`.
    closers: Vec<Option<usize>>,
}

impl CloserIndex {
    fn build(text: &str, name: &str) -> Self {
        let open = format!("{}{name}", Bbtag::OPEN);
        let close = format!("{}{name}{}", Bbtag::END_OPEN, Bbtag::CLOSE);

        let mut events: Vec<(usize, i64)> = text
            .match_indices(close.as_str())
            .map(|(at, _)| (at, 1))
            .collect();
        events.extend(
            text.match_indices(open.as_str())
                .filter(|(at, _)| {
                    matches!(text[at + open.len()..].chars().next(),
                        Some(c) if c == Bbtag::CLOSE || c.is_whitespace())
                })
                .map(|(at, _)| (at, -1)),
        );
        events.sort_unstable_by_key(|&(at, _)| at);

        // balance[g]: closers minus openers among the first g events. A body
        // starting at gap g closes at the first later gap with a higher
        // balance.
        let mut balance = Vec::with_capacity(events.len() + 1);
        balance.push(0i64);
        for &(_, step) in &events {
            balance.push(balance[balance.len() - 1] + step);
        }

        let mut closers = vec![None; balance.len()];
        let mut higher: Vec<usize> = Vec::new();
        for g in (0..balance.len()).rev() {
            while higher.last().is_some_and(|&j| balance[j] <= balance[g]) {
                higher.pop();
            }
            closers[g] = higher.last().map(|&j| events[j - 1].0);
            higher.push(g);
        }

        Self {
            offsets: events.into_iter().map(|(at, _)| at).collect(),
            closers,
        }
    }

    fn closer_for(&self, body_start: usize) -> Option<usize> {
        let gap = self.offsets.partition_point(|&at| at < body_start);
        self.closers[gap]
    }
}
