use crate::types::{CalorieProgress, LoggedEvent, ProgressSnapshot, WaterProgress};

/// Fold a user's events into today's snapshot.
///
/// Only events whose date string equals `today` exactly are counted. The
/// caller scopes `events` to a single user. Categories with no events sum
/// to zero, and the result does not depend on the order of `events`.
pub fn aggregate<'a, I>(events: I, today: &str, water_goal: i64, calorie_goal: i64) -> ProgressSnapshot
where
    I: IntoIterator<Item = &'a LoggedEvent>,
{
    let mut drunk_ml: u64 = 0;
    let mut burned: i64 = 0;
    let mut eaten_parts: Vec<f64> = Vec::new();

    for event in events.into_iter().filter(|e| e.date() == today) {
        match event {
            LoggedEvent::Water(w) => drunk_ml += u64::from(w.amount_ml),
            LoggedEvent::Food(f) => eaten_parts.push(f.kcal),
            LoggedEvent::Workout(w) => burned += w.kcal,
        }
    }

    // float addition is not associative; a fixed order keeps the total stable
    eaten_parts.sort_by(f64::total_cmp);
    let eaten: f64 = eaten_parts.iter().sum();

    ProgressSnapshot {
        water: WaterProgress {
            drunk_ml,
            goal_ml: water_goal,
        },
        calories: CalorieProgress {
            eaten,
            burned,
            goal: calorie_goal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FoodEvent, WaterEvent, WorkoutEvent};

    const TODAY: &str = "2025-06-01";

    fn water(date: &str, ml: u32) -> LoggedEvent {
        LoggedEvent::Water(WaterEvent {
            date: date.into(),
            amount_ml: ml,
        })
    }

    fn food(date: &str, kcal: f64) -> LoggedEvent {
        LoggedEvent::Food(FoodEvent {
            date: date.into(),
            name: "x".into(),
            kcal,
        })
    }

    fn workout(date: &str, kcal: i64) -> LoggedEvent {
        LoggedEvent::Workout(WorkoutEvent {
            date: date.into(),
            activity_type: "бег".into(),
            minutes: 30,
            kcal,
            water_ml: 200,
        })
    }

    #[test]
    fn empty_log_is_all_zero() {
        let snap = aggregate(&[], TODAY, 2100, 2030);
        assert_eq!(snap.water.drunk_ml, 0);
        assert_eq!(snap.calories.eaten, 0.0);
        assert_eq!(snap.calories.burned, 0);
        assert_eq!(snap.water.goal_ml, 2100);
        assert_eq!(snap.calories.goal, 2030);
    }

    #[test]
    fn sums_each_category() {
        let events = vec![
            water(TODAY, 250),
            water(TODAY, 500),
            food(TODAY, 120.5),
            food(TODAY, 80.0),
            workout(TODAY, 300),
        ];
        let snap = aggregate(&events, TODAY, 0, 0);
        assert_eq!(snap.water.drunk_ml, 750);
        assert_eq!(snap.calories.eaten, 200.5);
        assert_eq!(snap.calories.burned, 300);
    }

    #[test]
    fn other_dates_are_ignored() {
        let events = vec![
            water("2025-05-31", 1000),
            water(TODAY, 200),
            food("2025-06-02", 500.0),
            workout("2025-06-01T10:00:00", 999),
        ];
        let snap = aggregate(&events, TODAY, 0, 0);
        assert_eq!(snap.water.drunk_ml, 200);
        assert_eq!(snap.calories.eaten, 0.0);
        assert_eq!(snap.calories.burned, 0);
    }

    #[test]
    fn order_does_not_change_the_snapshot() {
        let events = vec![
            food(TODAY, 0.1),
            food(TODAY, 1e16),
            food(TODAY, 0.2),
            water(TODAY, 330),
            food(TODAY, -1e16),
            workout(TODAY, 120),
            food(TODAY, 0.3),
        ];
        let forward = aggregate(&events, TODAY, 2000, 1800);
        let mut reversed = events.clone();
        reversed.reverse();
        assert_eq!(aggregate(&reversed, TODAY, 2000, 1800), forward);
        let mut rotated = events.clone();
        rotated.rotate_left(3);
        assert_eq!(aggregate(&rotated, TODAY, 2000, 1800), forward);
    }
}
