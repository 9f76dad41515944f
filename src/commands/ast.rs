use anyhow::Result;

use super::{emit, load_formula, run_checked, to_json, Options};
use crate::cli::FormulaInput;
use crate::core::report::TreeNode;

pub fn main(input: &FormulaInput, opts: &Options) -> Result<i32> {
    let formula = load_formula(input)?;
    let Some(checked) = run_checked(&formula, opts) else {
        return Ok(1);
    };
    let tree = TreeNode::new(&checked.ast);
    let text = if opts.json { to_json(&tree)? } else { tree.render() };
    emit(&text, opts)?;
    Ok(0)
}
