//! Reusable test content.

/// Shell script standing in for the format compiler.
///
/// Answers the `--install` availability probe, fails for definitions whose
/// name starts with `bad`, and otherwise writes `<name>.py` into the output
/// directory and reports it on stdout. Every compilation is appended to
/// `calls.log` next to the script.
pub const FAKE_COMPILER: &str = r##"
log="$(dirname "$0")/calls.log"
if [ "$1" = "--install" ]; then
    exit 0
fi
def="$1"
out="$2"
name=$(basename "$def" .ksy)
echo "$def" >> "$log"
case "$name" in
    bad*)
        echo "cannot compile $name" >&2
        exit 1
        ;;
esac
mkdir -p "$out"
echo "# generated from $def" > "$out/$name.py"
printf '%s\t%s\n' "$name" "$out/$name.py"
"##;

/// A minimal definition with the given license.
pub fn definition(id: &str, license: Option<&str>) -> String {
    match license {
        Some(license) => format!("meta:\n  id: {id}\n  license: {license}\nseq: []\n"),
        None => format!("meta:\n  id: {id}\nseq: []\n"),
    }
}
