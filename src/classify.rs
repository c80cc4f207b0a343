use crate::{
    cube::CubeState,
    error::{Result, SearchError},
    limits::SearchLimits,
    moves::{Face, Move},
    table::SearchTable,
};
use log::debug;

// Every reachable state is at most this many moves from solved.
pub const GODS_NUMBER: u8 = 20;

// Compute the true distance of a state from solved.
//
// The table must come from exhaustive(table_depth): it has to contain every
// state within table_depth moves with its minimal depth. Deepening tries
// 0, 1, 2, ... extra moves and stops at the first level where some path of
// exactly that many moves lands inside the table. Since every shorter level
// failed, the state is further than table_depth + (extra - 1) moves away, so
// the first hit is minimal.
pub fn classify_depth(
    state: &CubeState,
    table: &SearchTable,
    table_depth: u8,
    limits: &SearchLimits,
) -> Result<u8> {
    let max_extra = GODS_NUMBER.saturating_sub(table_depth);
    for extra in 0..=max_extra {
        limits.check()?;
        if let Some(depth) = search(state, table, extra, None, limits)? {
            if extra > 0 {
                debug!("classified state after {} extra moves", extra);
            }
            return Ok(depth);
        }
    }
    Err(SearchError::Unreachable {
        ceiling: GODS_NUMBER,
    })
}

// Depth-first search for a path of exactly `remaining` moves into the table.
// Returns the distance from solved of `state` along the path found. The
// cancel flag is polled at every interior node.
fn search(
    state: &CubeState,
    table: &SearchTable,
    remaining: u8,
    last_face: Option<Face>,
    limits: &SearchLimits,
) -> Result<Option<u8>> {
    if remaining == 0 {
        return Ok(table.get(state));
    }
    limits.check()?;
    for m in Move::successors(last_face) {
        let next = state.apply(m);
        if let Some(depth) = search(&next, table, remaining - 1, Some(m.face()), limits)? {
            return Ok(Some(depth + 1));
        }
    }
    Ok(None)
}
