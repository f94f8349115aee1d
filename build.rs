use anyhow::Result;
use vergen::EmitBuilder;

// Git metadata for `mavlog --version`. Outside a checkout vergen falls back to
// placeholder values instead of failing the build.
fn main() -> Result<()> {
    EmitBuilder::builder()
        .build_date()
        .git_sha(true)
        .git_commit_date()
        .emit()?;
    Ok(())
}
