#![no_main]

//! Ledger fuzzer: arbitrary deltas, spends and windfalls against arbitrary
//! starting pools must never leave `[0, 10]`.

use arbitrary::Arbitrary;
use arctic_wargame::game::{Actor, Ledger, MAX_AMOUNT, ResourceKind, affordable, catalog};
use libfuzzer_sys::fuzz_target;

/// One ledger operation.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum LedgerOp {
    /// Signed clamped update.
    Delta { actor: u8, kind: u8, delta: i32 },
    /// Cost payment.
    Spend { actor: u8, kind: u8, amount: u8 },
    /// +1 bonus.
    Windfall { actor: u8, kind: u8 },
}

/// Structured input for ledger fuzzing.
#[derive(Arbitrary, Debug)]
struct LedgerInput {
    /// Operations to apply in order.
    ops: Vec<LedgerOp>,
}

fn actor(index: u8) -> Actor {
    Actor::ALL[usize::from(index) % Actor::ALL.len()]
}

fn kind(index: u8) -> ResourceKind {
    ResourceKind::ALL[usize::from(index) % ResourceKind::ALL.len()]
}

fuzz_target!(|input: LedgerInput| {
    let mut ledger = Ledger::initial();

    for op in input.ops.into_iter().take(256) {
        match op {
            LedgerOp::Delta { actor: a, kind: k, delta } => {
                ledger.apply_delta(actor(a), kind(k), delta);
            }
            LedgerOp::Spend { actor: a, kind: k, amount } => {
                ledger.pool_mut(actor(a)).spend(kind(k), amount);
            }
            LedgerOp::Windfall { actor: a, kind: k } => {
                ledger.pool_mut(actor(a)).windfall(kind(k));
            }
        }

        for a in Actor::ALL {
            let pool = ledger.pool(a);
            for (_, amount) in pool.iter() {
                assert!(amount <= MAX_AMOUNT, "amount {amount} out of range");
            }
            for action in affordable(pool, catalog(a)) {
                assert!(pool.covers(&action.cost), "unaffordable action offered");
            }
        }
    }
});
