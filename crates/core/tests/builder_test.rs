use fake::Fake;
use pretty_assertions::assert_eq;
use rollcall_core::{
    builder::{ScheduleBuilder, EMPTY_STATE_MESSAGE},
    errors::ValidationError,
    models::{Day, Schedule},
};
use rstest::rstest;

#[test]
fn test_new_builder_is_empty() {
    let builder = ScheduleBuilder::new();

    assert!(builder.schedule().is_empty());
    assert_eq!(builder.staged_value(), "");

    let view = builder.view();
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_message, Some(EMPTY_STATE_MESSAGE));
}

#[test]
fn test_add_slot_stages_canonical_string() {
    let mut builder = ScheduleBuilder::new();

    let slot = builder
        .add_slot([Day::Friday, Day::Monday, Day::Wednesday], "10:00", "12:00")
        .expect("Failed to add slot");
    builder
        .add_slot([Day::Thursday, Day::Tuesday], "13:00", "14:30")
        .expect("Failed to add slot");

    assert_eq!(builder.schedule().len(), 2);
    assert_eq!(builder.schedule().slots()[0].id(), slot.id());
    assert_eq!(
        builder.staged_value(),
        "MWF 10:00 AM-12:00 PM, TTh 1:00 PM-2:30 PM"
    );
}

#[rstest]
#[case(vec![], "09:00", "10:00", ValidationError::NoDaySelected)]
#[case(vec![Day::Monday], "", "10:00", ValidationError::MissingStartTime)]
#[case(vec![Day::Monday], "09:00", " ", ValidationError::MissingEndTime)]
#[case(vec![Day::Monday], "9am", "10:00", ValidationError::InvalidTime("9am".to_string()))]
#[case(vec![Day::Monday], "10:00", "09:00", ValidationError::EndNotAfterStart)]
#[case(vec![Day::Monday], "10:00", "10:00", ValidationError::EndNotAfterStart)]
fn test_add_slot_rejects_invalid_input(
    #[case] days: Vec<Day>,
    #[case] start: &str,
    #[case] end: &str,
    #[case] expected: ValidationError,
) {
    let mut builder = ScheduleBuilder::new();

    assert_eq!(builder.add_slot(days, start, end), Err(expected));
    assert!(builder.schedule().is_empty());
    assert_eq!(builder.staged_value(), "");
}

#[test]
fn test_add_overnight_slot() {
    let mut builder = ScheduleBuilder::new();

    let slot = builder
        .add_overnight_slot([Day::Saturday], "22:00", "01:00")
        .expect("Failed to add overnight slot");

    assert!(slot.is_overnight());
    assert_eq!(builder.staged_value(), "S 10:00 PM-1:00 AM");
    assert!(builder.view().rows[0].overnight);

    assert_eq!(
        builder.add_overnight_slot([Day::Saturday], "22:00", "22:00"),
        Err(ValidationError::ZeroLength)
    );
}

#[test]
fn test_selected_days_are_consumed_on_success() {
    let mut builder = ScheduleBuilder::new();
    builder.toggle_day(Day::Wednesday, true);
    builder.toggle_day(Day::Monday, true);
    builder.toggle_day(Day::Friday, true);
    builder.toggle_day(Day::Friday, false);

    // Failure keeps the selection
    assert_eq!(
        builder.add_selected_slot("11:00", "10:00", false),
        Err(ValidationError::EndNotAfterStart)
    );
    assert_eq!(builder.selected_days().len(), 2);

    builder
        .add_selected_slot("10:00", "11:00", false)
        .expect("Failed to add slot");
    assert!(builder.selected_days().is_empty());
    assert_eq!(builder.staged_value(), "MW 10:00 AM-11:00 AM");
}

#[test]
fn test_add_selected_slot_without_days() {
    let mut builder = ScheduleBuilder::new();

    assert_eq!(
        builder.add_selected_slot("10:00", "11:00", false),
        Err(ValidationError::NoDaySelected)
    );
}

#[test]
fn test_remove_slot() {
    let mut builder = ScheduleBuilder::new();
    let first = builder.add_slot([Day::Monday], "09:00", "10:00").unwrap();
    let second = builder.add_slot([Day::Tuesday], "09:00", "10:00").unwrap();

    builder.remove_slot(first.id());

    assert!(builder.schedule().get(first.id()).is_none());
    assert_eq!(builder.staged_value(), "T 9:00 AM-10:00 AM");

    // Removing again is a no-op
    builder.remove_slot(first.id());
    assert_eq!(builder.schedule().len(), 1);

    builder.remove_slot(second.id());
    assert_eq!(builder.staged_value(), "");
    assert_eq!(builder.view().empty_message, Some(EMPTY_STATE_MESSAGE));
}

#[test]
fn test_reset_all_clears_slots_and_selection() {
    let mut builder = ScheduleBuilder::new();
    builder.add_slot([Day::Monday], "09:00", "10:00").unwrap();
    builder.toggle_day(Day::Sunday, true);

    builder.reset_all();

    assert!(builder.schedule().is_empty());
    assert!(builder.selected_days().is_empty());
    assert_eq!(builder.staged_value(), "");
}

#[test]
fn test_load_replaces_previous_session() {
    let mut builder = ScheduleBuilder::new();
    builder.add_slot([Day::Monday], "09:00", "10:00").unwrap();
    builder.toggle_day(Day::Friday, true);

    builder.load("TTh 1:00 PM-2:30 PM");

    assert_eq!(builder.schedule().len(), 1);
    assert!(builder.selected_days().is_empty());
    assert_eq!(builder.staged_value(), "TTh 1:00 PM-2:30 PM");
}

#[test]
fn test_view_rows() {
    let builder = ScheduleBuilder::from_schedule_str("MWF 10:00 AM-12:00 PM");
    let view = builder.view();

    assert_eq!(view.empty_message, None);
    assert_eq!(view.value, "MWF 10:00 AM-12:00 PM");
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].days, "MWF");
    assert_eq!(view.rows[0].day_names, "Monday, Wednesday, Friday");
    assert_eq!(view.rows[0].time_range, "10:00 AM - 12:00 PM");
}

#[test]
fn test_days_are_sorted_regardless_of_insertion_order() {
    let mut builder = ScheduleBuilder::new();
    builder
        .add_slot(
            [Day::Sunday, Day::Saturday, Day::Friday, Day::Thursday, Day::Wednesday, Day::Tuesday, Day::Monday],
            "08:00",
            "09:00",
        )
        .unwrap();

    assert_eq!(builder.staged_value(), "MTWThFSSu 8:00 AM-9:00 AM");
}

#[test]
fn test_edit_session_round_trip() {
    let stored = "MWF 10:00 AM-12:00 PM, TTh 1:00 PM-2:30 PM";
    let mut builder = ScheduleBuilder::from_schedule_str(stored);

    assert_eq!(builder.schedule().len(), 2);
    assert_eq!(builder.staged_value(), stored);

    let second = builder.schedule().slots()[1].id();
    builder.remove_slot(second);

    assert_eq!(builder.staged_value(), "MWF 10:00 AM-12:00 PM");
}

#[test]
fn test_format_then_parse_round_trip() {
    for _ in 0..200 {
        let mut builder = ScheduleBuilder::new();
        let slot_count = (1..5usize).fake::<usize>();

        for _ in 0..slot_count {
            let mut days: Vec<Day> = Day::ALL
                .into_iter()
                .filter(|_| (0..2u8).fake::<u8>() == 1)
                .collect();
            if days.is_empty() {
                days.push(Day::Monday);
            }
            let start = (0..1439u32).fake::<u32>();
            let end = ((start + 1)..1440).fake::<u32>();

            builder
                .add_slot(
                    days,
                    &format!("{:02}:{:02}", start / 60, start % 60),
                    &format!("{:02}:{:02}", end / 60, end % 60),
                )
                .expect("Failed to add generated slot");
        }

        let formatted = builder.schedule().format();
        let reparsed = Schedule::parse(&formatted);

        assert!(
            reparsed.equivalent(builder.schedule()),
            "round trip failed for {formatted:?}"
        );
        assert_eq!(reparsed.format(), formatted);
    }
}
