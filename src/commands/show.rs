use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;

/// Print the manifest version
pub fn run_show(ctx: &ReleaseContext, json: bool) -> ReleaseResult<()> {
  let manager = ctx.manager();
  let version = manager.get_version()?;

  if json {
    let out = serde_json::json!({
      "manifest": manager.manifest_path(),
      "version": version,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
  } else {
    println!("{}", version);
  }

  Ok(())
}
