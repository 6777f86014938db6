//! Interpreter bootstrap: the fixed program handed to `python -c`.
//!
//! The bootstrap is the capability surface of the sandbox. It binds the
//! allow-listed namespace, executes the staged code once with stdout
//! captured, then saves at most one visual artifact (open matplotlib
//! figures flattened first; a `fig` object with a rasterize method second)
//! and reports everything back as a single marked JSON line. The host never
//! inspects interpreter state beyond that report.

/// Environment variable carrying the dataset path.
pub const ENV_DATASET: &str = "DECKGEN_DATASET";
/// Environment variable carrying the staged code file path.
pub const ENV_CODE: &str = "DECKGEN_CODE";
/// Environment variable carrying the artifact output path.
pub const ENV_ARTIFACT: &str = "DECKGEN_ARTIFACT";

/// Marker prefixing the report line on the child's real stdout.
pub const REPORT_MARKER: &str = "DECKGEN-REPORT ";

pub const BOOTSTRAP: &str = r#"
import contextlib, io, json, os, sys, traceback

import matplotlib
matplotlib.use("Agg")
import matplotlib.pyplot as plt
import numpy as np
import pandas as pd
try:
    import seaborn as sns
except Exception:
    sns = None

dataset = os.environ["DECKGEN_DATASET"]
if dataset.lower().endswith((".xls", ".xlsx")):
    df = pd.read_excel(dataset)
else:
    df = None
    for enc in ("utf-8", "latin1", "ISO-8859-1", "cp1252"):
        try:
            df = pd.read_csv(dataset, encoding=enc)
            break
        except Exception:
            continue
    if df is None:
        raise SystemExit("could not decode dataset with common encodings")

with open(os.environ["DECKGEN_CODE"], "r", encoding="utf-8") as fh:
    code = fh.read()

ns = {"df": df, "pd": pd, "np": np, "plt": plt, "sns": sns}
buf = io.StringIO()
error = None
with contextlib.redirect_stdout(buf):
    try:
        exec(compile(code, "<analysis>", "exec"), ns)
    except Exception:
        error = traceback.format_exc()

artifact = None
artifact_error = None
out = os.environ["DECKGEN_ARTIFACT"]
try:
    if plt.get_fignums():
        plt.savefig(out, dpi=150, bbox_inches="tight")
        plt.close("all")
        artifact = out
    else:
        fig = ns.get("fig")
        if fig is not None and hasattr(fig, "write_image"):
            fig.write_image(out, scale=2)
            artifact = out
except Exception as exc:
    artifact_error = str(exc)

report = {
    "stdout": buf.getvalue(),
    "error": error,
    "artifact": artifact,
    "artifact_error": artifact_error,
}
sys.stdout.write("\n" + "DECKGEN-REPORT " + json.dumps(report) + "\n")
"#;
