#![no_main]

use apexscan::walk::{self, Listener};
use apexscan::{lexer, parser};
use libfuzzer_sys::fuzz_target;
use std::convert::Infallible;

struct Balance(isize);

impl Listener for Balance {
    type Error = Infallible;

    fn enter_every_node(&mut self, _node: walk::NodeRef<'_>) -> Result<(), Infallible> {
        self.0 += 1;
        Ok(())
    }

    fn exit_every_node(&mut self, _node: walk::NodeRef<'_>) -> Result<(), Infallible> {
        self.0 -= 1;
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(tokens) = lexer::lex(source) else {
        return;
    };
    if let Ok(unit) = parser::parse(&tokens) {
        let mut balance = Balance(0);
        let _ = walk::walk(&unit, &mut balance);
        assert_eq!(balance.0, 0);
    }
});
