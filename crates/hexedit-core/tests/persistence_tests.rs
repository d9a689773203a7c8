#[cfg(test)]
mod tests {
    use hexedit_core::state::{Addressing, Session, ViewState};
    use hexedit_core::{Answer, Command, Input, NamedKey, PromptKind, QuestionKind, Response};
    use std::io::Write;

    fn open(data: &[u8]) -> (tempfile::NamedTempFile, Session) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        let view = ViewState::new(16, 8, 4, 512, Addressing::Byte);
        let session = Session::open(file.path(), false, view).unwrap();
        (file, session)
    }

    fn on_disk(file: &tempfile::NamedTempFile) -> Vec<u8> {
        std::fs::read(file.path()).unwrap()
    }

    fn type_keys(session: &mut Session, keys: &str) {
        for c in keys.chars() {
            session.handle_input(Input::Char(c));
        }
    }

    #[test]
    fn test_hex_overwrite_then_flush() {
        let (file, mut session) = open(&[0x00; 8]);
        session.view.set_cursor(2, 8);
        type_keys(&mut session, "ff");
        assert_eq!(session.edits.get(2), Some(0xFF));
        assert_eq!(on_disk(&file)[2], 0x00);

        assert_eq!(session.execute(Command::Save), Response::Message("Saved".to_string()));
        assert!(session.edits.is_empty());
        assert_eq!(on_disk(&file), vec![0, 0, 0xFF, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_undo_discards_everything() {
        let (file, mut session) = open(b"ABCD");
        session.execute(Command::ToggleDisplay);
        type_keys(&mut session, "xyz");
        session.execute(Command::Undo);
        assert!(session.edits.is_empty());
        assert_eq!(session.read_range(0, 4).unwrap(), b"ABCD");
        assert_eq!(on_disk(&file), b"ABCD");
    }

    #[test]
    fn test_append_extends_file_on_save() {
        let (file, mut session) = open(b"AB");
        session.execute(Command::ToggleDisplay);
        session.execute(Command::EndOfBuffer);
        assert_eq!(session.view.absolute(), 2);
        type_keys(&mut session, "CD");
        assert_eq!(session.effective_size(), 4);
        session.save();
        assert_eq!(on_disk(&file), b"ABCD");
        assert_eq!(session.store.file_size(), 4);
    }

    #[test]
    fn test_truncate_at_cursor() {
        let (file, mut session) = open(b"ABCDEFGHIJ");
        session.view.set_cursor(6, 10);
        session.selection.toggle(7);
        session.edits.set_byte(8, b'z');
        let question = session.execute(Command::Truncate);
        assert!(matches!(question, Response::Confirm(_)));

        session.answer(QuestionKind::Truncate, Answer::Yes);
        assert_eq!(on_disk(&file), b"ABCDEF");
        assert!(session.edits.is_empty());
        assert!(!session.selection.is_set());
        assert_eq!(session.effective_size(), 6);
    }

    #[test]
    fn test_truncate_declined_keeps_file() {
        let (file, mut session) = open(b"ABCDEFGHIJ");
        session.view.set_cursor(3, 10);
        session.answer(QuestionKind::Truncate, Answer::No);
        assert_eq!(on_disk(&file).len(), 10);
    }

    #[test]
    fn test_remove_marked_shifts_tail() {
        let (file, mut session) = open(b"ABCDEFGHIJ");
        session.view.set_cursor(2, 10);
        session.execute(Command::SetMark);
        session.handle_input(Input::Char('l'));
        session.handle_input(Input::Char('l'));
        session.handle_input(Input::Char('l'));
        session.handle_input(Input::Char('l'));
        assert_eq!(session.selection.bounds(), Some((2, 4)));

        let response = session.execute(Command::RemoveMarked);
        assert_eq!(response, Response::Done);
        assert_eq!(on_disk(&file), b"ABFGHIJ");
        assert!(!session.selection.is_set());
        assert_eq!(session.store.file_size(), 7);
    }

    #[test]
    fn test_insert_at_end_appends() {
        let (file, mut session) = open(b"ABCDEFGHIJ");
        session.execute(Command::EndOfBuffer);
        let prompt = session.execute(Command::InsertString);
        assert!(matches!(
            prompt,
            Response::Prompt(ref p) if p.kind == PromptKind::InsertString
        ));
        let response = session.submit(PromptKind::InsertString, "5859");
        assert_eq!(response, Response::Done);
        assert_eq!(on_disk(&file), b"ABCDEFGHIJXY");
        assert_eq!(session.view.absolute(), 10);
        assert_eq!(session.highlight, Some(10..12));
    }

    #[test]
    fn test_insert_in_middle_keeps_cursor_offset() {
        let (file, mut session) = open(b"ABCDEF");
        session.execute(Command::ToggleDisplay);
        session.view.set_cursor(3, 6);
        session.submit(PromptKind::InsertString, "xyz");
        assert_eq!(on_disk(&file), b"ABCxyzDEF");
        assert_eq!(session.view.absolute(), 3);
    }

    #[test]
    fn test_insert_clears_selection_after_point() {
        let (_file, mut session) = open(b"ABCDEF");
        session.selection.toggle(4);
        session.view.set_cursor(1, 6);
        session.insert_bytes(b"--");
        assert!(!session.selection.is_set());
    }

    #[test]
    fn test_structural_edit_asks_to_save_first() {
        let (file, mut session) = open(b"ABCDEF");
        session.execute(Command::ToggleDisplay);
        type_keys(&mut session, "Z");
        let response = session.execute(Command::InsertString);
        let Response::Confirm(question) = response else {
            panic!("expected a save question");
        };
        assert!(question.allow_cancel);

        let next = session.answer(question.kind, Answer::Yes);
        assert!(matches!(next, Response::Prompt(_)));
        assert_eq!(on_disk(&file), b"ZBCDEF");
    }

    #[test]
    fn test_save_question_no_discards_edits() {
        let (file, mut session) = open(b"ABCDEF");
        session.edits.set_byte(0, b'!');
        let response = session.execute(Command::SaveAndQuit);
        let Response::Confirm(question) = response else {
            panic!("expected a save question");
        };
        assert_eq!(session.answer(question.kind, Answer::No), Response::Quit);
        assert_eq!(on_disk(&file), b"ABCDEF");
    }

    #[test]
    fn test_save_question_cancel_keeps_edits() {
        let (_file, mut session) = open(b"ABCDEF");
        session.edits.set_byte(0, b'!');
        let Response::Confirm(question) = session.execute(Command::SaveAndQuit) else {
            panic!("expected a save question");
        };
        assert_eq!(session.answer(question.kind, Answer::Cancel), Response::Done);
        assert_eq!(session.edits.get(0), Some(b'!'));
    }

    #[test]
    fn test_read_only_refuses_edits() {
        let (_file, mut session) = {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(b"ABCD").unwrap();
            let view = ViewState::new(16, 8, 4, 512, Addressing::Byte);
            let session = Session::open(file.path(), true, view).unwrap();
            (file, session)
        };
        assert_eq!(
            session.handle_input(Input::Char('a')),
            Response::Notice("File is read-only!".to_string())
        );
        assert!(session.edits.is_empty());
        assert_eq!(
            session.execute(Command::Truncate),
            Response::Notice("File is read-only!".to_string())
        );
    }

    #[test]
    fn test_yank_to_file_and_overwrite_question() {
        let (_file, mut session) = open(b"ABCDEF");
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("clip.bin");

        session.selection.toggle(1);
        session.selection.extend(3);
        session.execute(Command::CopyRegion);
        let response = session.submit(PromptKind::YankFile, target.to_str().unwrap());
        assert!(matches!(response, Response::Message(_)));
        assert_eq!(std::fs::read(&target).unwrap(), b"BCD");

        let again = session.submit(PromptKind::YankFile, target.to_str().unwrap());
        assert!(matches!(
            again,
            Response::Confirm(ref q) if matches!(q.kind, QuestionKind::OverwriteFile(_))
        ));
    }

    #[test]
    fn test_command_line_write_then_quit() {
        let (file, mut session) = open(b"ABCD");
        session.edits.set_byte(1, b'b');
        assert_eq!(session.submit(PromptKind::CommandLine, "wq"), Response::Quit);
        assert_eq!(on_disk(&file), b"AbCD");
    }

    #[test]
    fn test_open_other_file_resets_state() {
        let (_file, mut session) = open(b"ABCD");
        let (other, _) = open(b"0123456789");
        session.view.set_cursor(3, 4);
        session.selection.toggle(3);
        let response = session.submit(PromptKind::OpenFile, other.path().to_str().unwrap());
        assert_eq!(response, Response::Done);
        assert_eq!(session.view.absolute(), 0);
        assert!(!session.selection.is_set());
        assert_eq!(session.effective_size(), 10);
    }

    #[test]
    fn test_open_missing_file_reports() {
        let (_file, mut session) = open(b"ABCD");
        let response = session.open_file("/definitely/not/here.bin");
        assert!(matches!(response, Response::Notice(ref m) if m.starts_with("No such file")));
    }

    #[test]
    fn test_undo_drops_mark_on_discarded_tail() {
        let (file, mut session) = open(b"AB");
        session.handle_input(Input::Key(NamedKey::Tab));
        session.handle_input(Input::Key(NamedKey::End));
        type_keys(&mut session, "CDEF");
        assert_eq!(session.effective_size(), 6);

        session.handle_input(Input::Key(NamedKey::Left));
        session.handle_input(Input::Key(NamedKey::Left));
        session.handle_input(Input::Key(NamedKey::F(9)));
        session.handle_input(Input::Key(NamedKey::Right));
        assert_eq!(session.selection.bounds(), Some((4, 5)));

        session.handle_input(Input::Ctrl('_'));
        assert_eq!(session.effective_size(), 2);
        assert_eq!(session.selection.bounds(), None);

        assert!(matches!(
            session.handle_input(Input::Key(NamedKey::F(12))),
            Response::Notice(_)
        ));
        session.handle_input(Input::Ctrl('w'));
        assert_eq!(on_disk(&file), b"AB");
    }

    #[test]
    fn test_revert_drops_mark_past_new_end() {
        let (_file, mut session) = open(b"AB");
        session.handle_input(Input::Key(NamedKey::Tab));
        session.handle_input(Input::Key(NamedKey::End));
        type_keys(&mut session, "CD");
        session.handle_input(Input::Key(NamedKey::Left));
        session.handle_input(Input::Key(NamedKey::F(9)));
        assert_eq!(session.selection.bounds(), Some((3, 3)));

        session.handle_input(Input::Key(NamedKey::Delete));
        assert_eq!(session.effective_size(), 3);
        assert_eq!(session.selection.bounds(), None);
    }

    #[test]
    fn test_failed_save_reports_once_and_reclamps_cursor() {
        let (file, mut session) = {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(b"ABCD").unwrap();
            file.flush().unwrap();
            let view = ViewState::new(16, 8, 4, 512, Addressing::Byte);
            let session = Session::open(file.path(), true, view).unwrap();
            (file, session)
        };
        session.edits.set_byte(1, b'b');
        session.edits.set_byte(6, b'g');
        assert_eq!(session.effective_size(), 7);
        session.view.set_cursor(6, 7);

        let response = session.save();
        assert!(matches!(response, Response::Notice(ref msg) if msg.starts_with("File is read-only!")));
        assert!(session.edits.is_empty());
        assert_eq!(session.effective_size(), 4);
        assert!(session.view.absolute() <= session.effective_size());
        assert_eq!(on_disk(&file), b"ABCD");
    }
}
