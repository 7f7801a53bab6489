// src/seeder.rs
use sqlx::SqlitePool;

/// (name, description, category, muscle group)
const EXERCISES: &[(&str, &str, &str, &str)] = &[
    // Strength - chest
    ("Bench Press", "Classic compound chest exercise with barbell", "strength", "chest"),
    ("Push-Up", "Bodyweight chest and tricep exercise", "strength", "chest"),
    ("Incline Dumbbell Press", "Upper chest focused press", "strength", "chest"),
    ("Cable Fly", "Isolation chest exercise using cables", "strength", "chest"),
    // Strength - back
    ("Pull-Up", "Compound back and bicep bodyweight exercise", "strength", "back"),
    ("Deadlift", "Full body compound lift targeting posterior chain", "strength", "back"),
    ("Bent Over Row", "Barbell row for mid and upper back", "strength", "back"),
    ("Lat Pulldown", "Machine exercise targeting lats", "strength", "back"),
    // Strength - legs
    ("Squat", "King of lower body exercises", "strength", "legs"),
    ("Leg Press", "Machine compound leg exercise", "strength", "legs"),
    ("Romanian Deadlift", "Hamstring focused hip hinge", "strength", "legs"),
    ("Lunges", "Unilateral leg exercise for quads and glutes", "strength", "legs"),
    ("Calf Raise", "Isolation exercise for calves", "strength", "legs"),
    // Strength - shoulders
    ("Overhead Press", "Compound shoulder pressing movement", "strength", "shoulders"),
    ("Lateral Raise", "Isolation for medial deltoid", "strength", "shoulders"),
    ("Front Raise", "Isolation for anterior deltoid", "strength", "shoulders"),
    ("Face Pull", "Rear delt and rotator cuff exercise", "strength", "shoulders"),
    // Strength - arms
    ("Bicep Curl", "Isolation exercise for biceps", "strength", "arms"),
    ("Tricep Dips", "Compound tricep exercise", "strength", "arms"),
    ("Hammer Curl", "Brachialis and bicep curl variation", "strength", "arms"),
    ("Skull Crusher", "Tricep isolation with EZ bar", "strength", "arms"),
    // Cardio
    ("Running", "Steady state or interval outdoor run", "cardio", "full body"),
    ("Cycling", "Stationary or outdoor bike cardio", "cardio", "legs"),
    ("Jump Rope", "High intensity cardio with rope", "cardio", "full body"),
    ("Rowing Machine", "Full body cardio on rowing machine", "cardio", "full body"),
    ("Elliptical", "Low impact full body cardio", "cardio", "full body"),
    ("Burpees", "High intensity full body cardio", "cardio", "full body"),
    ("Box Jump", "Explosive plyometric exercise", "cardio", "legs"),
    // Flexibility
    ("Yoga Flow", "Dynamic stretching and flexibility routine", "flexibility", "full body"),
    ("Hip Flexor Stretch", "Static stretch for hip flexors", "flexibility", "hips"),
    ("Hamstring Stretch", "Static stretch for hamstrings", "flexibility", "legs"),
    ("Shoulder Mobility", "Shoulder rotation and mobility drills", "flexibility", "shoulders"),
    ("Pigeon Pose", "Deep hip opener yoga pose", "flexibility", "hips"),
    ("Foam Rolling", "Self-myofascial release technique", "flexibility", "full body"),
];

pub fn catalog_size() -> usize {
    EXERCISES.len()
}

/// Inserts the exercise catalog when the table is empty. Returns the number of rows inserted.
pub async fn seed_exercises(pool: &SqlitePool) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises")
        .fetch_one(&mut *tx)
        .await?;
    if count > 0 {
        tracing::debug!(count, "Exercise catalog already seeded");
        return Ok(0);
    }

    for &(name, description, category, muscle_group) in EXERCISES {
        sqlx::query("INSERT INTO exercises (name, description, category, muscle_group) VALUES (?, ?, ?, ?)")
            .bind(name)
            .bind(description)
            .bind(category)
            .bind(muscle_group)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    tracing::info!(inserted = EXERCISES.len(), "Seeded exercise catalog");
    Ok(EXERCISES.len())
}
