//! Computed-result caches
//!
//! Each recursive operation memoizes through one of these fixed-capacity,
//! open-addressed tables. A probe hits exactly one cell; collisions simply
//! overwrite. The *error* edge in the first key slot marks an empty cell, so
//! neither failure value is ever cached. None of this affects correctness: a
//! cold cache recomputes the same canonical result.
//!
//! Tables double when the fill passes the load limit, up to a per-table
//! maximum, and `sweep` drops every cell that touches a node whose reference
//! count has fallen to zero, which keeps the cache consistent across GC.

use log::debug;

use crate::alloc::{MemGauge, NodeArena};
use crate::edge::Edge;
use crate::expr::Expr;

const INIT_SIZE: usize = 1 << 10;
const MAX_SIZE: usize = 1 << 20;
pub(crate) const DEFAULT_LOAD_LIMIT: f64 = 0.8;

/// True when the edge points at a node that nothing references anymore.
#[inline]
fn check_noref(e: Edge, arena: &NodeArena) -> bool {
    match e.node_id() {
        Some(id) => arena.node(id).noref(),
        None => false,
    }
}

/// Shared sizing state of one table.
struct TblCtl {
    name: &'static str,
    used: usize,
    size: usize,
    mask: usize,
    next_limit: usize,
    load_limit: f64,
    max_size: usize,
}

impl TblCtl {
    fn new(name: &'static str) -> TblCtl {
        TblCtl {
            name,
            used: 0,
            size: 0,
            mask: 0,
            next_limit: 0,
            load_limit: DEFAULT_LOAD_LIMIT,
            max_size: MAX_SIZE,
        }
    }

    fn adopt(&mut self, size: usize) {
        self.size = size;
        self.mask = size - 1;
        self.used = 0;
        self.update_next_limit();
    }

    fn update_next_limit(&mut self) {
        self.next_limit = (self.size as f64 * self.load_limit) as usize;
    }

    fn wants_growth(&self) -> bool {
        self.used > self.next_limit && self.size < self.max_size
    }

    fn set_load_limit(&mut self, load_limit: f64) {
        self.load_limit = load_limit;
        self.update_next_limit();
    }
}

/// Sweep interface every computed table exposes to the collector.
pub(crate) trait ComputedTable {
    /// Drops every cell whose key or value references a dead node.
    fn sweep(&mut self, arena: &NodeArena);

    /// Drops everything.
    fn clear(&mut self);

    fn used_num(&self) -> usize;

    fn set_load_limit(&mut self, load_limit: f64);
}

macro_rules! cell_hash1 {
    ($e:expr) => {{
        let v = $e.hash_val();
        (v.wrapping_mul(v) >> 8) as usize
    }};
}

macro_rules! cell_hash2 {
    ($e1:expr, $e2:expr) => {{
        let v1 = $e1.hash_val();
        let v2 = $e2.hash_val();
        v1.wrapping_add(v2)
            .wrapping_add(v2)
            .wrapping_add(v1 >> 2)
            .wrapping_add(v2 >> 4) as usize
    }};
}

macro_rules! cell_hash3 {
    ($e1:expr, $e2:expr, $e3:expr) => {{
        let v1 = $e1.hash_val();
        let v2 = $e2.hash_val();
        let v3 = $e3.hash_val();
        v1.wrapping_add(v2)
            .wrapping_add(v3)
            .wrapping_add(v1 >> 2)
            .wrapping_add(v2 >> 4)
            .wrapping_add(v3 >> 6) as usize
    }};
}

// ---------------------------------------------------------------------------
// one-key table
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
struct Cell1 {
    key1: Edge,
    ans: Edge,
}

impl Cell1 {
    fn empty() -> Cell1 {
        Cell1 {
            key1: Edge::error(),
            ans: Edge::error(),
        }
    }
}

/// Result cache keyed by a single edge.
pub(crate) struct CompTbl1 {
    ctl: TblCtl,
    cells: Vec<Cell1>,
}

impl CompTbl1 {
    pub(crate) fn new(name: &'static str, gauge: &mut MemGauge) -> CompTbl1 {
        let mut tbl = CompTbl1 {
            ctl: TblCtl::new(name),
            cells: Vec::new(),
        };
        tbl.resize(INIT_SIZE, gauge);
        tbl
    }

    #[inline]
    fn pos(&self, k1: Edge) -> usize {
        cell_hash1!(k1) & self.ctl.mask
    }

    pub(crate) fn get(&self, k1: Edge) -> Edge {
        if self.cells.is_empty() {
            return Edge::error();
        }
        let cell = &self.cells[self.pos(k1)];
        if cell.key1 == k1 {
            cell.ans
        } else {
            Edge::error()
        }
    }

    pub(crate) fn put(&mut self, k1: Edge, ans: Edge, gauge: &mut MemGauge) {
        if k1.is_invalid() || ans.is_invalid() || self.cells.is_empty() {
            return;
        }
        if self.ctl.wants_growth() && !self.resize(self.ctl.size << 1, gauge) {
            return;
        }
        let pos = self.pos(k1);
        let cell = &mut self.cells[pos];
        if cell.key1.is_error() {
            self.ctl.used += 1;
        }
        cell.key1 = k1;
        cell.ans = ans;
    }

    fn resize(&mut self, new_size: usize, gauge: &mut MemGauge) -> bool {
        debug!(target: "robdd", "{}: resize({})", self.ctl.name, new_size);
        let new_bytes = (new_size * std::mem::size_of::<Cell1>()) as u64;
        if !gauge.claim(new_bytes) {
            return false;
        }
        let old = std::mem::replace(&mut self.cells, vec![Cell1::empty(); new_size]);
        let old_bytes = (old.len() * std::mem::size_of::<Cell1>()) as u64;
        self.ctl.adopt(new_size);
        for cell in old {
            if !cell.key1.is_error() {
                let pos = self.pos(cell.key1);
                if self.cells[pos].key1.is_error() {
                    self.ctl.used += 1;
                }
                self.cells[pos] = cell;
            }
        }
        gauge.release(old_bytes);
        true
    }
}

impl ComputedTable for CompTbl1 {
    fn sweep(&mut self, arena: &NodeArena) {
        debug!(target: "robdd", "{}: sweep()", self.ctl.name);
        for cell in &mut self.cells {
            if !cell.key1.is_error()
                && (check_noref(cell.key1, arena) || check_noref(cell.ans, arena))
            {
                cell.key1 = Edge::error();
                self.ctl.used -= 1;
            }
        }
    }

    fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.key1 = Edge::error();
        }
        self.ctl.used = 0;
    }

    fn used_num(&self) -> usize {
        self.ctl.used
    }

    fn set_load_limit(&mut self, load_limit: f64) {
        self.ctl.set_load_limit(load_limit);
    }
}

// ---------------------------------------------------------------------------
// two-key table
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
struct Cell2 {
    key1: Edge,
    key2: Edge,
    ans: Edge,
}

impl Cell2 {
    fn empty() -> Cell2 {
        Cell2 {
            key1: Edge::error(),
            key2: Edge::error(),
            ans: Edge::error(),
        }
    }
}

/// Result cache keyed by an edge pair.
pub(crate) struct CompTbl2 {
    ctl: TblCtl,
    cells: Vec<Cell2>,
}

impl CompTbl2 {
    pub(crate) fn new(name: &'static str, gauge: &mut MemGauge) -> CompTbl2 {
        let mut tbl = CompTbl2 {
            ctl: TblCtl::new(name),
            cells: Vec::new(),
        };
        tbl.resize(INIT_SIZE, gauge);
        tbl
    }

    #[inline]
    fn pos(&self, k1: Edge, k2: Edge) -> usize {
        cell_hash2!(k1, k2) & self.ctl.mask
    }

    pub(crate) fn get(&self, k1: Edge, k2: Edge) -> Edge {
        if self.cells.is_empty() {
            return Edge::error();
        }
        let cell = &self.cells[self.pos(k1, k2)];
        if cell.key1 == k1 && cell.key2 == k2 {
            cell.ans
        } else {
            Edge::error()
        }
    }

    pub(crate) fn put(&mut self, k1: Edge, k2: Edge, ans: Edge, gauge: &mut MemGauge) {
        if k1.is_invalid() || k2.is_invalid() || ans.is_invalid() || self.cells.is_empty() {
            return;
        }
        if self.ctl.wants_growth() && !self.resize(self.ctl.size << 1, gauge) {
            return;
        }
        let pos = self.pos(k1, k2);
        let cell = &mut self.cells[pos];
        if cell.key1.is_error() {
            self.ctl.used += 1;
        }
        cell.key1 = k1;
        cell.key2 = k2;
        cell.ans = ans;
    }

    fn resize(&mut self, new_size: usize, gauge: &mut MemGauge) -> bool {
        debug!(target: "robdd", "{}: resize({})", self.ctl.name, new_size);
        let new_bytes = (new_size * std::mem::size_of::<Cell2>()) as u64;
        if !gauge.claim(new_bytes) {
            return false;
        }
        let old = std::mem::replace(&mut self.cells, vec![Cell2::empty(); new_size]);
        let old_bytes = (old.len() * std::mem::size_of::<Cell2>()) as u64;
        self.ctl.adopt(new_size);
        for cell in old {
            if !cell.key1.is_error() {
                let pos = self.pos(cell.key1, cell.key2);
                if self.cells[pos].key1.is_error() {
                    self.ctl.used += 1;
                }
                self.cells[pos] = cell;
            }
        }
        gauge.release(old_bytes);
        true
    }
}

impl ComputedTable for CompTbl2 {
    fn sweep(&mut self, arena: &NodeArena) {
        debug!(target: "robdd", "{}: sweep()", self.ctl.name);
        for cell in &mut self.cells {
            if !cell.key1.is_error()
                && (check_noref(cell.key1, arena)
                    || check_noref(cell.key2, arena)
                    || check_noref(cell.ans, arena))
            {
                cell.key1 = Edge::error();
                self.ctl.used -= 1;
            }
        }
    }

    fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.key1 = Edge::error();
        }
        self.ctl.used = 0;
    }

    fn used_num(&self) -> usize {
        self.ctl.used
    }

    fn set_load_limit(&mut self, load_limit: f64) {
        self.ctl.set_load_limit(load_limit);
    }
}

// ---------------------------------------------------------------------------
// three-key table
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
struct Cell3 {
    key1: Edge,
    key2: Edge,
    key3: Edge,
    ans: Edge,
}

impl Cell3 {
    fn empty() -> Cell3 {
        Cell3 {
            key1: Edge::error(),
            key2: Edge::error(),
            key3: Edge::error(),
            ans: Edge::error(),
        }
    }
}

/// Result cache keyed by an edge triple (if-then-else and friends).
pub(crate) struct CompTbl3 {
    ctl: TblCtl,
    cells: Vec<Cell3>,
}

impl CompTbl3 {
    pub(crate) fn new(name: &'static str, gauge: &mut MemGauge) -> CompTbl3 {
        let mut tbl = CompTbl3 {
            ctl: TblCtl::new(name),
            cells: Vec::new(),
        };
        tbl.resize(INIT_SIZE, gauge);
        tbl
    }

    #[inline]
    fn pos(&self, k1: Edge, k2: Edge, k3: Edge) -> usize {
        cell_hash3!(k1, k2, k3) & self.ctl.mask
    }

    pub(crate) fn get(&self, k1: Edge, k2: Edge, k3: Edge) -> Edge {
        if self.cells.is_empty() {
            return Edge::error();
        }
        let cell = &self.cells[self.pos(k1, k2, k3)];
        if cell.key1 == k1 && cell.key2 == k2 && cell.key3 == k3 {
            cell.ans
        } else {
            Edge::error()
        }
    }

    pub(crate) fn put(&mut self, k1: Edge, k2: Edge, k3: Edge, ans: Edge, gauge: &mut MemGauge) {
        if k1.is_invalid()
            || k2.is_invalid()
            || k3.is_invalid()
            || ans.is_invalid()
            || self.cells.is_empty()
        {
            return;
        }
        if self.ctl.wants_growth() && !self.resize(self.ctl.size << 1, gauge) {
            return;
        }
        let pos = self.pos(k1, k2, k3);
        let cell = &mut self.cells[pos];
        if cell.key1.is_error() {
            self.ctl.used += 1;
        }
        cell.key1 = k1;
        cell.key2 = k2;
        cell.key3 = k3;
        cell.ans = ans;
    }

    fn resize(&mut self, new_size: usize, gauge: &mut MemGauge) -> bool {
        debug!(target: "robdd", "{}: resize({})", self.ctl.name, new_size);
        let new_bytes = (new_size * std::mem::size_of::<Cell3>()) as u64;
        if !gauge.claim(new_bytes) {
            return false;
        }
        let old = std::mem::replace(&mut self.cells, vec![Cell3::empty(); new_size]);
        let old_bytes = (old.len() * std::mem::size_of::<Cell3>()) as u64;
        self.ctl.adopt(new_size);
        for cell in old {
            if !cell.key1.is_error() {
                let pos = self.pos(cell.key1, cell.key2, cell.key3);
                if self.cells[pos].key1.is_error() {
                    self.ctl.used += 1;
                }
                self.cells[pos] = cell;
            }
        }
        gauge.release(old_bytes);
        true
    }
}

impl ComputedTable for CompTbl3 {
    fn sweep(&mut self, arena: &NodeArena) {
        debug!(target: "robdd", "{}: sweep()", self.ctl.name);
        for cell in &mut self.cells {
            if !cell.key1.is_error()
                && (check_noref(cell.key1, arena)
                    || check_noref(cell.key2, arena)
                    || check_noref(cell.key3, arena)
                    || check_noref(cell.ans, arena))
            {
                cell.key1 = Edge::error();
                self.ctl.used -= 1;
            }
        }
    }

    fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.key1 = Edge::error();
        }
        self.ctl.used = 0;
    }

    fn used_num(&self) -> usize {
        self.ctl.used
    }

    fn set_load_limit(&mut self, load_limit: f64) {
        self.ctl.set_load_limit(load_limit);
    }
}

// ---------------------------------------------------------------------------
// cover table (edge pair -> BDD + symbolic cover)
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct IsopCell {
    key1: Edge,
    key2: Edge,
    ans_bdd: Edge,
    ans_cov: Option<Expr>,
}

impl IsopCell {
    fn empty() -> IsopCell {
        IsopCell {
            key1: Edge::error(),
            key2: Edge::error(),
            ans_bdd: Edge::error(),
            ans_cov: None,
        }
    }
}

/// ISOP/prime-cover cache: the result is a BDD edge together with the
/// sum-of-products expression that produced it.
pub(crate) struct IsopTbl {
    ctl: TblCtl,
    cells: Vec<IsopCell>,
}

impl IsopTbl {
    pub(crate) fn new(name: &'static str, gauge: &mut MemGauge) -> IsopTbl {
        let mut tbl = IsopTbl {
            ctl: TblCtl::new(name),
            cells: Vec::new(),
        };
        tbl.resize(INIT_SIZE, gauge);
        tbl
    }

    #[inline]
    fn pos(&self, k1: Edge, k2: Edge) -> usize {
        cell_hash2!(k1, k2) & self.ctl.mask
    }

    pub(crate) fn get(&self, k1: Edge, k2: Edge) -> Option<(Edge, Expr)> {
        if self.cells.is_empty() {
            return None;
        }
        let cell = &self.cells[self.pos(k1, k2)];
        if cell.key1 == k1 && cell.key2 == k2 {
            cell.ans_cov.clone().map(|cov| (cell.ans_bdd, cov))
        } else {
            None
        }
    }

    pub(crate) fn put(&mut self, k1: Edge, k2: Edge, ans_bdd: Edge, ans_cov: &Expr, gauge: &mut MemGauge) {
        if k1.is_invalid() || k2.is_invalid() || ans_bdd.is_invalid() || self.cells.is_empty() {
            return;
        }
        if self.ctl.wants_growth() && !self.resize(self.ctl.size << 1, gauge) {
            return;
        }
        let pos = self.pos(k1, k2);
        let cell = &mut self.cells[pos];
        if cell.key1.is_error() {
            self.ctl.used += 1;
        }
        cell.key1 = k1;
        cell.key2 = k2;
        cell.ans_bdd = ans_bdd;
        cell.ans_cov = Some(ans_cov.clone());
    }

    fn resize(&mut self, new_size: usize, gauge: &mut MemGauge) -> bool {
        debug!(target: "robdd", "{}: resize({})", self.ctl.name, new_size);
        let new_bytes = (new_size * std::mem::size_of::<IsopCell>()) as u64;
        if !gauge.claim(new_bytes) {
            return false;
        }
        let old = std::mem::replace(&mut self.cells, vec![IsopCell::empty(); new_size]);
        let old_bytes = (old.len() * std::mem::size_of::<IsopCell>()) as u64;
        self.ctl.adopt(new_size);
        for cell in old {
            if !cell.key1.is_error() {
                let pos = self.pos(cell.key1, cell.key2);
                if self.cells[pos].key1.is_error() {
                    self.ctl.used += 1;
                }
                self.cells[pos] = cell;
            }
        }
        gauge.release(old_bytes);
        true
    }
}

impl ComputedTable for IsopTbl {
    fn sweep(&mut self, arena: &NodeArena) {
        debug!(target: "robdd", "{}: sweep()", self.ctl.name);
        for cell in &mut self.cells {
            if !cell.key1.is_error()
                && (check_noref(cell.key1, arena)
                    || check_noref(cell.key2, arena)
                    || check_noref(cell.ans_bdd, arena))
            {
                *cell = IsopCell::empty();
                self.ctl.used -= 1;
            }
        }
    }

    fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = IsopCell::empty();
        }
        self.ctl.used = 0;
    }

    fn used_num(&self) -> usize {
        self.ctl.used
    }

    fn set_load_limit(&mut self, load_limit: f64) {
        self.ctl.set_load_limit(load_limit);
    }
}
