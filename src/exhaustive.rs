use crate::{
    classify::classify_depth,
    cube::CubeState,
    error::{Result, SearchError},
    limits::SearchLimits,
    moves::{Face, Move},
    table::SearchTable,
};
use log::{debug, info};
use std::time::Instant;

// Successors of a node other than the root; the root has 18.
const MAX_NEW_PER_NODE: usize = 15;

#[derive(Clone, Copy)]
struct SearchNode {
    state: CubeState,
    depth: u8,
    last_face: Option<Face>,
}

// Breadth-first search over the move graph, one level at a time.
struct Searcher<'a> {
    found: SearchTable,
    to_expand: Vec<SearchNode>,
    limits: &'a SearchLimits,
}

impl<'a> Searcher<'a> {
    fn new(limits: &'a SearchLimits) -> Searcher<'a> {
        let start = CubeState::solved();
        let mut found = SearchTable::new();
        found.insert_if_absent(&start, 0);
        Searcher {
            found,
            to_expand: vec![SearchNode {
                state: start,
                depth: 0,
                last_face: None,
            }],
            limits,
        }
    }

    // Discover every state one move deeper than the current frontier.
    // Successors are only queued for expansion if they are shallower than
    // max_depth.
    fn expand_depth(&mut self, max_depth: u8) -> Result<()> {
        let frontier = std::mem::take(&mut self.to_expand);
        let depth = match frontier.first() {
            Some(x) => x.depth + 1,
            None => return Ok(()),
        };
        self.found
            .try_reserve(frontier.len() * MAX_NEW_PER_NODE, depth)?;
        let mut next = Vec::new();
        if depth < max_depth {
            next.try_reserve(frontier.len() * MAX_NEW_PER_NODE)
                .map_err(|source| SearchError::OutOfMemory { depth, source })?;
        }

        for node in frontier {
            for m in Move::successors(node.last_face) {
                let state = node.state.apply(m);
                if !self.found.insert_if_absent(&state, depth) {
                    continue;
                }
                if depth < max_depth {
                    next.push(SearchNode {
                        state,
                        depth,
                        last_face: Some(m.face()),
                    });
                }
            }
            self.limits.check()?;
            self.limits.check_states(depth, self.found.len())?;
        }
        self.to_expand = next;
        Ok(())
    }
}

// Enumerate every state within max_depth moves of solved, labeled with its
// minimal move count.
pub fn exhaustive(max_depth: u8, limits: &SearchLimits) -> Result<SearchTable> {
    let mut searcher = Searcher::new(limits);
    for depth in 1..=max_depth {
        limits.check()?;
        let start = Instant::now();
        let before = searcher.found.len();
        searcher.expand_depth(max_depth)?;
        info!(
            "exhaustive search: depth {} has {} states ({:.2?})",
            depth,
            searcher.found.len() - before,
            start.elapsed()
        );
        debug!("frontier size: {}", searcher.to_expand.len());
    }
    Ok(searcher.found)
}

// A table known to be complete and minimal up to its depth. Only tables like
// this can answer distance queries for arbitrary states.
#[derive(Clone, Debug)]
pub struct ExhaustiveTable {
    table: SearchTable,
    depth: u8,
}

impl ExhaustiveTable {
    pub fn build(depth: u8, limits: &SearchLimits) -> Result<ExhaustiveTable> {
        Ok(ExhaustiveTable {
            table: exhaustive(depth, limits)?,
            depth,
        })
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn table(&self) -> &SearchTable {
        &self.table
    }

    pub fn into_table(self) -> SearchTable {
        self.table
    }

    // The true distance from solved of any reachable state.
    pub fn classify(&self, state: &CubeState, limits: &SearchLimits) -> Result<u8> {
        classify_depth(state, &self.table, self.depth, limits)
    }
}
