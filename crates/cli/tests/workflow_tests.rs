//! End-to-end tests of the add and interactive flows, using in-memory
//! stand-ins for the terminal selector, the clipboard and the paste bridge.

use std::cell::RefCell;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use command_search_cli::cli_args::{determine_mode, Mode};
use command_search_cli::command_selection::{Selection, Selector};
use command_search_cli::workflow::{run_add, run_interactive, Interaction, Outcome};
use command_search_core::clipboard::ClipboardWriter;
use command_search_core::command_definitions::{CommandEntry, CommandList};
use command_search_core::error::{Error, Result};
use command_search_core::file_handling::{load_commands, save_commands};
use command_search_core::paste::{injector_for, PasteInjector, Platform};
use tempfile::{tempdir, NamedTempFile};

/// Returns a fixed selection and records what it was shown.
struct ScriptedSelector {
    selection: Selection,
    labels: Vec<String>,
    previews: Vec<String>,
}

impl ScriptedSelector {
    fn new(selection: Selection) -> Self {
        Self {
            selection,
            labels: Vec::new(),
            previews: Vec::new(),
        }
    }
}

impl Selector for ScriptedSelector {
    fn select(
        &mut self,
        candidate_count: usize,
        label: &dyn Fn(usize) -> String,
        preview: &dyn Fn(Option<usize>, u16, u16) -> String,
    ) -> Result<Selection> {
        self.labels = (0..candidate_count).map(label).collect();
        self.previews.push(preview(None, 90, 30));
        if let Selection::Index(index) = self.selection {
            self.previews.push(preview(Some(index), 90, 30));
        }
        Ok(self.selection)
    }
}

#[derive(Default)]
struct RecordingClipboard {
    writes: Vec<String>,
    fail: bool,
}

impl ClipboardWriter for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Clipboard("no clipboard provider".to_string()));
        }
        self.writes.push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingInjector {
    pastes: RefCell<Vec<String>>,
}

impl PasteInjector for RecordingInjector {
    fn paste(&self, text: &str) -> Result<()> {
        self.pastes.borrow_mut().push(text.to_string());
        Ok(())
    }
}

fn two_commands() -> CommandList {
    CommandList::new(vec![
        CommandEntry::new("ls", "List files"),
        CommandEntry::new("pwd", "Print working directory"),
    ])
}

fn commands_file(commands: &CommandList) -> NamedTempFile {
    let temp_file = NamedTempFile::new().unwrap();
    save_commands(temp_file.path(), commands).unwrap();
    temp_file
}

/// Selects the first entry after deleting the directory holding the commands
/// file, so the save that follows has nowhere to write.
struct DirectoryRemovingSelector {
    dir: PathBuf,
}

impl Selector for DirectoryRemovingSelector {
    fn select(
        &mut self,
        _candidate_count: usize,
        _label: &dyn Fn(usize) -> String,
        _preview: &dyn Fn(Option<usize>, u16, u16) -> String,
    ) -> Result<Selection> {
        std::fs::remove_dir_all(&self.dir).unwrap();
        Ok(Selection::Index(0))
    }
}

/// Runs an interactive session and returns the outcome with everything printed.
fn run_session(
    path: &Path,
    selector: &mut dyn Selector,
    clipboard: &mut RecordingClipboard,
    injector: Option<&dyn PasteInjector>,
    typed: &str,
) -> (Result<Outcome>, String) {
    let mut interaction = Interaction {
        selector,
        clipboard,
        injector,
        input: Cursor::new(typed.to_string()),
        output: Vec::new(),
    };

    let outcome = run_interactive(path, &mut interaction);
    let printed = String::from_utf8(interaction.output).unwrap();
    (outcome, printed)
}

#[test]
fn test_add_appends_in_order() {
    let temp_file = commands_file(&CommandList::new(vec![CommandEntry::new("ls", "List files")]));

    let Mode::Add {
        command,
        description,
    } = determine_mode(&[
        "add".to_string(),
        "\"pwd\"".to_string(),
        "\"Print working directory\"".to_string(),
    ])
    .unwrap()
    else {
        panic!("Expected add mode");
    };

    let mut output = Vec::new();
    run_add(temp_file.path(), &command, &description, &mut output).unwrap();

    assert_eq!(load_commands(temp_file.path()).unwrap(), two_commands());
    assert_eq!(String::from_utf8(output).unwrap(), "Command added.\n");
}

#[test]
fn test_add_creates_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("commands.yml");

    run_add(&path, "uptime", "", &mut Vec::new()).unwrap();

    assert_eq!(
        load_commands(&path).unwrap().commands,
        vec![CommandEntry::new("uptime", "")]
    );
}

#[test]
fn test_add_does_not_overwrite_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("commands.yml");
    std::fs::write(&path, "commands: [ {").unwrap();

    let result = run_add(&path, "ls", "List files", &mut Vec::new());

    assert!(matches!(result, Err(Error::Yaml { .. })));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "commands: [ {");
}

#[test]
fn test_usage_error_performs_no_mutation() {
    let temp_file = commands_file(&two_commands());
    let before = std::fs::read_to_string(temp_file.path()).unwrap();

    let result = determine_mode(&["add".to_string(), "onlyonearg".to_string()]);

    assert!(matches!(result, Err(Error::Usage(_))));
    assert_eq!(std::fs::read_to_string(temp_file.path()).unwrap(), before);
}

#[test]
fn test_selector_sees_commands_and_preview() {
    let temp_file = commands_file(&two_commands());
    let mut selector = ScriptedSelector::new(Selection::Index(1));
    let mut clipboard = RecordingClipboard::default();
    let injector = RecordingInjector::default();

    let (outcome, _) = run_session(
        temp_file.path(),
        &mut selector,
        &mut clipboard,
        Some(&injector),
        "\n",
    );

    assert!(outcome.is_ok());
    assert_eq!(selector.labels, vec!["ls", "pwd"]);
    assert_eq!(selector.previews[0], "");
    assert_eq!(
        selector.previews[1],
        "Command: pwd\n\nDescription: Print working directory"
    );
}

#[test]
fn test_abort_is_clean_and_touches_nothing() {
    let temp_file = commands_file(&two_commands());
    let mut selector = ScriptedSelector::new(Selection::Aborted);
    let mut clipboard = RecordingClipboard::default();
    let injector = RecordingInjector::default();

    let (outcome, printed) = run_session(
        temp_file.path(),
        &mut selector,
        &mut clipboard,
        Some(&injector),
        "",
    );

    assert_eq!(outcome.unwrap(), Outcome::Aborted);
    assert_eq!(printed, "Search aborted\n");
    assert!(clipboard.writes.is_empty());
    assert!(injector.pastes.borrow().is_empty());
    assert_eq!(load_commands(temp_file.path()).unwrap(), two_commands());
}

#[test]
fn test_default_action_copies_then_pastes() {
    let temp_file = commands_file(&two_commands());
    let mut selector = ScriptedSelector::new(Selection::Index(0));
    let mut clipboard = RecordingClipboard::default();
    let injector = RecordingInjector::default();

    let (outcome, printed) = run_session(
        temp_file.path(),
        &mut selector,
        &mut clipboard,
        Some(&injector),
        "\n",
    );

    assert_eq!(outcome.unwrap(), Outcome::Copied { pasted: true });
    assert_eq!(clipboard.writes, vec!["ls"]);
    assert_eq!(*injector.pastes.borrow(), vec!["ls"]);
    assert!(printed.contains("\nSelected:\nls - List files\n"));
    assert!(printed.contains("Copied to clipboard: ls\n"));
    assert_eq!(load_commands(temp_file.path()).unwrap(), two_commands());
}

#[test]
fn test_unrecognised_input_falls_through_to_copy() {
    let temp_file = commands_file(&two_commands());
    let mut selector = ScriptedSelector::new(Selection::Index(1));
    let mut clipboard = RecordingClipboard::default();

    let (outcome, _) = run_session(temp_file.path(), &mut selector, &mut clipboard, None, "x\n");

    assert_eq!(outcome.unwrap(), Outcome::Copied { pasted: false });
    assert_eq!(clipboard.writes, vec!["pwd"]);
}

/// Pasting is best effort: once the copy succeeded, a paste failure is only reported
#[test]
fn test_unsupported_platform_paste_is_non_fatal_after_copy() {
    let temp_file = commands_file(&two_commands());
    let mut selector = ScriptedSelector::new(Selection::Index(0));
    let mut clipboard = RecordingClipboard::default();
    let injector = injector_for(Platform::from_os_name("solaris"));

    let (outcome, printed) = run_session(
        temp_file.path(),
        &mut selector,
        &mut clipboard,
        Some(injector.as_ref()),
        "\n",
    );

    assert_eq!(outcome.unwrap(), Outcome::Copied { pasted: false });
    assert_eq!(clipboard.writes, vec!["ls"]);
    assert!(printed.contains("Copied to clipboard only: Pasting is not supported on this platform: solaris"));
}

#[test]
fn test_clipboard_failure_is_fatal_and_skips_paste() {
    let temp_file = commands_file(&two_commands());
    let mut selector = ScriptedSelector::new(Selection::Index(0));
    let mut clipboard = RecordingClipboard {
        fail: true,
        ..RecordingClipboard::default()
    };
    let injector = RecordingInjector::default();

    let (outcome, _) = run_session(
        temp_file.path(),
        &mut selector,
        &mut clipboard,
        Some(&injector),
        "\n",
    );

    assert!(matches!(outcome, Err(Error::Clipboard(_))));
    assert!(injector.pastes.borrow().is_empty());
}

#[test]
fn test_delete_selected_entry() {
    let temp_file = commands_file(&two_commands());
    let mut selector = ScriptedSelector::new(Selection::Index(0));
    let mut clipboard = RecordingClipboard::default();

    let (outcome, printed) = run_session(temp_file.path(), &mut selector, &mut clipboard, None, "d\n");

    assert_eq!(outcome.unwrap(), Outcome::Deleted);
    assert!(printed.ends_with("Deleted successfully.\n"));
    assert!(clipboard.writes.is_empty());
    assert_eq!(
        load_commands(temp_file.path()).unwrap().commands,
        vec![CommandEntry::new("pwd", "Print working directory")]
    );
}

#[test]
fn test_edit_with_blank_inputs_leaves_entry_unchanged() {
    let temp_file = commands_file(&two_commands());
    let mut selector = ScriptedSelector::new(Selection::Index(1));
    let mut clipboard = RecordingClipboard::default();

    let (outcome, printed) = run_session(temp_file.path(), &mut selector, &mut clipboard, None, "e\n\n\n");

    assert_eq!(outcome.unwrap(), Outcome::Edited);
    assert!(printed.contains("Edit command [pwd]: Edit description [Print working directory]: "));
    assert!(printed.ends_with("Edited and saved.\n"));
    assert_eq!(load_commands(temp_file.path()).unwrap(), two_commands());
}

#[test]
fn test_edit_command_only() {
    let temp_file = commands_file(&two_commands());
    let mut selector = ScriptedSelector::new(Selection::Index(1));
    let mut clipboard = RecordingClipboard::default();

    let (outcome, _) = run_session(
        temp_file.path(),
        &mut selector,
        &mut clipboard,
        None,
        "e\npwd -P\n\n",
    );

    assert_eq!(outcome.unwrap(), Outcome::Edited);
    assert_eq!(
        load_commands(temp_file.path()).unwrap().commands,
        vec![
            CommandEntry::new("ls", "List files"),
            CommandEntry::new("pwd -P", "Print working directory"),
        ]
    );
}

#[test]
fn test_missing_file_is_fatal_in_interactive_mode() {
    let dir = tempdir().unwrap();
    let mut selector = ScriptedSelector::new(Selection::Index(0));
    let mut clipboard = RecordingClipboard::default();

    let (outcome, _) = run_session(
        &dir.path().join("commands.yml"),
        &mut selector,
        &mut clipboard,
        None,
        "",
    );

    assert!(matches!(outcome, Err(Error::FileNotFound { .. })));
    assert!(selector.labels.is_empty());
}

#[test]
fn test_empty_collection_skips_selector() {
    let temp_file = commands_file(&CommandList::default());
    let mut selector = ScriptedSelector::new(Selection::Index(0));
    let mut clipboard = RecordingClipboard::default();

    let (outcome, printed) = run_session(temp_file.path(), &mut selector, &mut clipboard, None, "");

    assert_eq!(outcome.unwrap(), Outcome::Empty);
    assert!(printed.starts_with("No commands saved yet."));
    assert!(selector.previews.is_empty());
}

#[test]
fn test_delete_persist_failure_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("commands.yml");
    save_commands(&path, &two_commands()).unwrap();
    let mut selector = DirectoryRemovingSelector {
        dir: dir.path().to_path_buf(),
    };
    let mut clipboard = RecordingClipboard::default();

    let (outcome, printed) = run_session(&path, &mut selector, &mut clipboard, None, "d\n");

    let error = outcome.unwrap_err();
    assert!(matches!(error, Error::Persist { ref operation, ref original }
        if operation == "Delete" && matches!(**original, Error::Io { .. })));
    assert!(error.to_string().starts_with("Delete failed: "));
    assert!(!printed.contains("Deleted successfully."));
    assert!(clipboard.writes.is_empty());
}

#[test]
fn test_edit_persist_failure_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("commands.yml");
    save_commands(&path, &two_commands()).unwrap();
    let mut selector = DirectoryRemovingSelector {
        dir: dir.path().to_path_buf(),
    };
    let mut clipboard = RecordingClipboard::default();

    let (outcome, printed) = run_session(&path, &mut selector, &mut clipboard, None, "e\nx\n\n");

    let error = outcome.unwrap_err();
    assert!(matches!(error, Error::Persist { ref operation, ref original }
        if operation == "Edit" && matches!(**original, Error::Io { .. })));
    assert!(error.to_string().starts_with("Edit failed: "));
    assert!(!printed.contains("Edited and saved."));
}
