//! Line-oriented command interpreter.
//!
//! Keeps a name -> `PixelBuffer` map and maps textual verbs onto
//! `ImageModel` calls. The engine itself never sees names; this layer looks
//! them up and stores the results. A missing name reaches the engine as an
//! absent image and comes back as `InvalidArgument`.
//!
//! One failing command never aborts a script: the error is written to the
//! output sink and execution continues with the next line.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::codec::{load_image, save_image};
use crate::error::{RasterError, Result as RasterResult};
use crate::model::ImageModel;

/// Maximum depth of nested `run` commands
const MAX_SCRIPT_DEPTH: usize = 16;

/// Errors produced while executing one command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Wrong number of arguments for a known verb
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// Verb is not recognized
    #[error("Invalid command! Unknown verb '{0}'")]
    Unknown(String),

    /// A numeric argument could not be parsed
    #[error("Invalid number '{0}'")]
    Parse(String),

    /// `run` commands nested too deeply
    #[error("Scripts nested deeper than {0} levels")]
    TooDeep(usize),

    /// Script or input line is not valid UTF-8
    #[error("Line {0} is not valid UTF-8")]
    Encoding(usize),

    /// Engine or codec failure
    #[error(transparent)]
    Raster(#[from] RasterError),
}

impl From<io::Error> for CommandError {
    fn from(e: io::Error) -> Self {
        Self::Raster(RasterError::Io(e))
    }
}

fn expect_args<'a, const N: usize>(
    args: &[&'a str],
    usage: &'static str,
) -> Result<[&'a str; N], CommandError> {
    <[&'a str; N]>::try_from(args).map_err(|_| CommandError::Usage(usage))
}

/// Interpreter state: named images plus the sink for user-visible output.
pub struct ImageController<W: Write> {
    model: ImageModel,
    images: HashMap<String, PixelBuffer>,
    out: W,
    depth: usize,
}

impl<W: Write> ImageController<W> {
    pub fn new(out: W) -> Self {
        Self {
            model: ImageModel::new(),
            images: HashMap::new(),
            out,
            depth: 0,
        }
    }

    /// Look up a stored image.
    pub fn image(&self, name: &str) -> Option<&PixelBuffer> {
        self.images.get(name)
    }

    /// Store an image under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: &str, image: PixelBuffer) {
        self.images.insert(name.to_string(), image);
    }

    /// Number of stored images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Consume the controller and return the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Execute a single command line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn process_command(&mut self, line: &str) -> Result<(), CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = tokens.split_first() else {
            return Ok(());
        };
        debug!("command: {line}");

        match verb {
            "load" => {
                let [path, name] = expect_args(args, "load <input_file_path> <reference_name>")?;
                let image = load_image(Path::new(path))?;
                self.insert(name, image);
            }
            "save" => {
                let [path, name] = expect_args(args, "save <save_path> <reference_name>")?;
                let image = self.images.get(name).ok_or_else(RasterError::null_image)?;
                save_image(Path::new(path), image)?;
            }
            "horizontal-flip" => self.unary(
                args,
                "horizontal-flip <reference_name> <output_name>",
                |m, i| m.flip_horizontal(i),
            )?,
            "vertical-flip" => self.unary(
                args,
                "vertical-flip <reference_name> <output_name>",
                |m, i| m.flip_vertical(i),
            )?,
            "brighten" => {
                let [src, dst, amount] =
                    expect_args(args, "brighten <reference_name> <output_name> <increment>")?;
                let delta = amount
                    .parse::<i32>()
                    .map_err(|_| CommandError::Parse(amount.to_string()))?;
                let result = self.model.brighten(self.images.get(src), delta)?;
                self.insert(dst, result);
            }
            "blur" => self.unary(args, "blur <reference_name> <output_name>", |m, i| m.blur(i))?,
            "sharpen" => self.unary(args, "sharpen <reference_name> <output_name>", |m, i| {
                m.sharpen(i)
            })?,
            "sepia" => self.unary(args, "sepia <reference_name> <output_name>", |m, i| m.sepia(i))?,
            "greyscale" | "greyScale" => self.unary(
                args,
                "greyscale <reference_name> <output_name>",
                |m, i| m.greyscale(i),
            )?,
            "luma-component" => self.unary(
                args,
                "luma-component <reference_name> <output_name>",
                |m, i| m.luma(i),
            )?,
            "value-component" => self.unary(
                args,
                "value-component <reference_name> <output_name>",
                |m, i| m.value(i),
            )?,
            "intensity-component" => self.unary(
                args,
                "intensity-component <reference_name> <output_name>",
                |m, i| m.intensity(i),
            )?,
            "red-component" => self.unary(
                args,
                "red-component <reference_name> <output_name>",
                |m, i| m.red_component(i),
            )?,
            "green-component" => self.unary(
                args,
                "green-component <reference_name> <output_name>",
                |m, i| m.green_component(i),
            )?,
            "blue-component" => self.unary(
                args,
                "blue-component <reference_name> <output_name>",
                |m, i| m.blue_component(i),
            )?,
            "rgb-split" => {
                let [src, red, green, blue] = expect_args(
                    args,
                    "rgb-split <reference_name> <red_name> <green_name> <blue_name>",
                )?;
                let image = self.images.get(src);
                let r = self.model.red_component(image)?;
                let g = self.model.green_component(image)?;
                let b = self.model.blue_component(image)?;
                self.insert(red, r);
                self.insert(green, g);
                self.insert(blue, b);
            }
            "rgb-combine" => {
                let [dst, red, green, blue] = expect_args(
                    args,
                    "rgb-combine <output_name> <red_name> <green_name> <blue_name>",
                )?;
                let result = self.model.combine(
                    self.images.get(red),
                    self.images.get(green),
                    self.images.get(blue),
                )?;
                self.insert(dst, result);
            }
            "compress" => {
                let [src, dst, threshold] =
                    expect_args(args, "compress <reference_name> <output_name> <threshold>")?;
                let threshold = threshold
                    .parse::<f64>()
                    .map_err(|_| CommandError::Parse(threshold.to_string()))?;
                let result = self.model.compress(self.images.get(src), threshold)?;
                self.insert(dst, result);
            }
            "run" => {
                let [path] = expect_args(args, "run <script_path>")?;
                self.run_script(Path::new(path))?;
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        }
        Ok(())
    }

    /// `<verb> <src> <dst>` commands that map one image to another.
    fn unary<F>(&mut self, args: &[&str], usage: &'static str, op: F) -> Result<(), CommandError>
    where
        F: FnOnce(&ImageModel, Option<&PixelBuffer>) -> RasterResult<PixelBuffer>,
    {
        let [src, dst] = expect_args(args, usage)?;
        let result = op(&self.model, self.images.get(src))?;
        self.insert(dst, result);
        Ok(())
    }

    /// Execute a line and report any failure to the output sink.
    ///
    /// Only I/O errors on the sink itself are returned.
    pub fn handle_line(&mut self, line: &str) -> io::Result<()> {
        if let Err(e) = self.process_command(line) {
            warn!("command '{}' failed: {e}", line.trim());
            writeln!(self.out, "{e}")?;
        }
        Ok(())
    }

    /// Decode one raw input line and execute it.
    ///
    /// A line that is not UTF-8 is reported like any other failed command.
    fn handle_raw_line(&mut self, number: usize, raw: &[u8]) -> io::Result<()> {
        match std::str::from_utf8(raw) {
            Ok(line) => self.handle_line(line),
            Err(_) => {
                let e = CommandError::Encoding(number);
                warn!("{e}");
                writeln!(self.out, "{e}")
            }
        }
    }

    /// Execute every line of the script at `path`.
    ///
    /// Individual command failures are reported and skipped. Failing to open
    /// the script is returned to the caller.
    pub fn run_script(&mut self, path: &Path) -> Result<(), CommandError> {
        if self.depth >= MAX_SCRIPT_DEPTH {
            return Err(CommandError::TooDeep(MAX_SCRIPT_DEPTH));
        }
        let reader = BufReader::new(File::open(path)?);
        debug!("running script {}", path.display());

        self.depth += 1;
        let result = self.run_lines(reader);
        self.depth -= 1;
        result
    }

    fn run_lines<R: BufRead>(&mut self, reader: R) -> Result<(), CommandError> {
        for (index, raw) in reader.split(b'\n').enumerate() {
            self.handle_raw_line(index + 1, &raw?)?;
        }
        Ok(())
    }

    /// Prompt for commands on `input` until EOF or `exit`.
    pub fn run_interactive<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        let mut line = Vec::new();
        for number in 1.. {
            write!(self.out, "Enter command: ")?;
            self.out.flush()?;

            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if line.trim_ascii().eq_ignore_ascii_case(b"exit") {
                writeln!(self.out, "Exiting program...")?;
                break;
            }
            self.handle_raw_line(number, &line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn controller() -> ImageController<Vec<u8>> {
        ImageController::new(Vec::new())
    }

    fn output(c: ImageController<Vec<u8>>) -> String {
        String::from_utf8(c.into_output()).unwrap()
    }

    fn sample() -> PixelBuffer {
        let mut img = PixelBuffer::new(2, 2);
        img.set(0, 0, [255, 0, 0]).unwrap();
        img.set(0, 1, [0, 255, 0]).unwrap();
        img.set(1, 0, [0, 0, 255]).unwrap();
        img.set(1, 1, [255, 255, 0]).unwrap();
        img
    }

    #[test]
    fn test_blank_and_comment_lines_ignored() {
        let mut c = controller();
        c.process_command("").unwrap();
        c.process_command("   ").unwrap();
        c.process_command("# load a.ppm a").unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn test_unknown_verb() {
        let mut c = controller();
        c.handle_line("invalid a a").unwrap();
        assert!(c.is_empty());
        assert!(output(c).contains("Invalid command!"));
    }

    #[test]
    fn test_wrong_argument_count() {
        let mut c = controller();
        c.insert("img", sample());
        let err = c.process_command("load pathWithoutSecondParam").unwrap_err();
        assert!(matches!(err, CommandError::Usage(_)));
        assert_eq!(
            err.to_string(),
            "Usage: load <input_file_path> <reference_name>"
        );
        assert!(matches!(
            c.process_command("blur img"),
            Err(CommandError::Usage(_))
        ));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_unary_commands_store_result() {
        let mut c = controller();
        c.insert("img", sample());
        c.process_command("horizontal-flip img flipped").unwrap();
        assert_eq!(c.image("flipped").unwrap().get(0, 0).unwrap(), [0, 255, 0]);

        c.process_command("greyScale img grey").unwrap();
        assert_eq!(c.image("grey").unwrap().get(0, 0).unwrap(), [76, 76, 76]);

        c.process_command("intensity-component img inten").unwrap();
        assert_eq!(c.image("inten").unwrap().get(1, 1).unwrap(), [170, 170, 170]);
    }

    #[test]
    fn test_brighten_argument_order() {
        let mut c = controller();
        c.insert("img", sample());
        c.process_command("brighten img bright 10").unwrap();
        assert_eq!(c.image("bright").unwrap().get(1, 0).unwrap(), [10, 10, 255]);
        assert!(matches!(
            c.process_command("brighten img bright lots"),
            Err(CommandError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_image_is_invalid_argument() {
        let mut c = controller();
        let err = c.process_command("blur nothing out").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Raster(RasterError::InvalidArgument(_))
        ));
        assert!(c.image("out").is_none());
    }

    #[test]
    fn test_split_and_combine() {
        let mut c = controller();
        c.insert("img", sample());
        c.process_command("rgb-split img r g b").unwrap();
        c.process_command("rgb-combine joined r g b").unwrap();
        assert_eq!(c.image("joined").unwrap(), &sample());
    }

    #[test]
    fn test_later_results_overwrite_names() {
        let mut c = controller();
        c.insert("img", sample());
        c.process_command("vertical-flip img img").unwrap();
        assert_eq!(c.image("img").unwrap().get(0, 0).unwrap(), [0, 0, 255]);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_script_continues_after_failure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.ppm");
        let output_path = dir.path().join("out.ppm");
        let script = dir.path().join("script.txt");

        fs::write(&input, "P3\n1 1\n255\n10\n20\n30\n").unwrap();
        fs::write(
            &script,
            format!(
                "# sample script\nload {} img\nbogus img x\nblur missing x\n\nbrighten img b 5\nsave {} b\n",
                input.display(),
                output_path.display()
            ),
        )
        .unwrap();

        let mut c = controller();
        c.process_command(&format!("run {}", script.display())).unwrap();

        let saved = fs::read_to_string(&output_path).unwrap();
        assert_eq!(saved, "P3\n1 1\n255\n15\n25\n35\n");
        let text = output(c);
        assert!(text.contains("Invalid command!"));
        assert!(text.contains("image cannot be null"));
    }

    #[test]
    fn test_script_skips_invalid_utf8_line() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("script.txt");
        fs::write(&script, b"bogus\n\xff\xfe bad\n# next\nblur img after\n").unwrap();

        let mut c = controller();
        c.insert("img", sample());
        c.run_script(&script).unwrap();

        assert!(c.image("after").is_some());
        let text = output(c);
        assert!(text.contains("Invalid command!"));
        assert!(text.contains("Line 2 is not valid UTF-8"));
    }

    #[test]
    fn test_interactive_skips_invalid_utf8_line() {
        let mut c = controller();
        c.insert("img", sample());
        let input = b"\xc3\x28 img\nvalue-component img v\nexit\n";
        c.run_interactive(&input[..]).unwrap();
        assert!(c.image("v").is_some());
        assert!(output(c).contains("Line 1 is not valid UTF-8"));
    }

    #[test]
    fn test_self_recursive_script_stops() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("loop.txt");
        fs::write(&script, format!("run {}\n", script.display())).unwrap();

        let mut c = controller();
        c.process_command(&format!("run {}", script.display())).unwrap();
        assert!(output(c).contains("nested deeper"));
    }

    #[test]
    fn test_missing_script_is_error() {
        let mut c = controller();
        assert!(c.process_command("run /definitely/not/here.txt").is_err());
    }

    #[test]
    fn test_interactive_until_exit() {
        let mut c = controller();
        c.insert("img", sample());
        let input = b"value-component img v\nEXIT\nblur img never\n";
        c.run_interactive(&input[..]).unwrap();
        assert!(c.image("v").is_some());
        assert!(c.image("never").is_none());
        assert!(output(c).contains("Exiting program..."));
    }
}
