//! AFL fuzz harness for the lariat container.
//!
//! Replays decoded operations against both a `Lariat` and a plain `Vec`
//! reference model, then checks:
//! 1. Every operation agrees with the model (returned values and errors)
//! 2. The logical sequence matches the model after every operation
//! 3. No block is empty and none exceeds capacity
//!
//! Capacity is fixed at 4 so splits and underflows trigger constantly.

use afl::fuzz;
use lariat::Lariat;

const CAPACITY: usize = 4;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    PushBack { value: u8 },
    PushFront { value: u8 },
    Insert { pos_frac: u8, value: u8 },
    Remove { pos_frac: u8 },
    PopFront,
    PopBack,
    Compact,
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 7;
        let rest = &bytes[1..];

        match op_type {
            0 if !rest.is_empty() => Some((FuzzOp::PushBack { value: rest[0] }, &rest[1..])),
            1 if !rest.is_empty() => Some((FuzzOp::PushFront { value: rest[0] }, &rest[1..])),
            2 if rest.len() >= 2 => {
                let op = FuzzOp::Insert { pos_frac: rest[0], value: rest[1] };
                Some((op, &rest[2..]))
            }
            3 if !rest.is_empty() => Some((FuzzOp::Remove { pos_frac: rest[0] }, &rest[1..])),
            4 => Some((FuzzOp::PopFront, rest)),
            5 => Some((FuzzOp::PopBack, rest)),
            6 => Some((FuzzOp::Compact, rest)),
            _ => None,
        }
    }
}

fn apply(op: FuzzOp, lariat: &mut Lariat<u8, CAPACITY>, model: &mut Vec<u8>) {
    match op {
        FuzzOp::PushBack { value } => {
            lariat.push_back(value).unwrap();
            model.push(value);
        }
        FuzzOp::PushFront { value } => {
            lariat.push_front(value).unwrap();
            model.insert(0, value);
        }
        FuzzOp::Insert { pos_frac, value } => {
            let pos = pos_frac as usize * (model.len() + 1) / 256;
            lariat.insert(pos, value).unwrap();
            model.insert(pos, value);
        }
        FuzzOp::Remove { pos_frac } => {
            if model.is_empty() {
                assert!(lariat.remove(0).is_err());
                return;
            }
            let pos = pos_frac as usize * model.len() / 256;
            assert_eq!(lariat.remove(pos).unwrap(), model.remove(pos));
        }
        FuzzOp::PopFront => {
            if model.is_empty() {
                assert!(lariat.pop_front().is_err());
                return;
            }
            assert_eq!(lariat.pop_front().unwrap(), model.remove(0));
        }
        FuzzOp::PopBack => {
            if model.is_empty() {
                assert!(lariat.pop_back().is_err());
                return;
            }
            assert_eq!(lariat.pop_back().unwrap(), model.pop().unwrap());
        }
        FuzzOp::Compact => {
            lariat.compact();
        }
    }
}

fn check(lariat: &Lariat<u8, CAPACITY>, model: &[u8]) {
    assert_eq!(lariat.len(), model.len());
    assert!(lariat.iter().eq(model.iter()), "sequence diverged from model");

    for block in lariat.blocks() {
        assert!(!block.is_empty(), "empty block persisted");
        assert!(block.len() <= CAPACITY, "block over capacity");
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        let mut lariat: Lariat<u8, CAPACITY> = Lariat::new();
        let mut model: Vec<u8> = Vec::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            apply(op, &mut lariat, &mut model);
            check(&lariat, &model);
            remaining = rest;
        }
    });
}
