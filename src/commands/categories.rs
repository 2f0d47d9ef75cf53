// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::ExpenseStore;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(store: &ExpenseStore, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", _)) = m.subcommand() {
        let data = store
            .list_categories()?
            .into_iter()
            .map(|name| vec![name])
            .collect();
        println!("{}", pretty_table(&["Category"], data));
    }
    Ok(())
}
