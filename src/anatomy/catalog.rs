// Built-in region catalog
//
// Three strings per region: tooltip label, panel heading, and the anatomical
// phrase sent to the model. The phrase is deliberately more precise than the
// heading (head of the muscle, Latin name) so recommendations target the
// sub-region rather than the whole muscle.

use super::{MuscleGroup, MuscleRegion, RegionId};

const fn region(
    id: &'static str,
    group: MuscleGroup,
    label: &'static str,
    display_name: &'static str,
    anatomical_name: &'static str,
) -> MuscleRegion {
    MuscleRegion {
        id: RegionId::new(id),
        group,
        interactive: true,
        label,
        display_name,
        anatomical_name,
    }
}

const fn decorative(id: &'static str, group: MuscleGroup, label: &'static str) -> MuscleRegion {
    MuscleRegion {
        id: RegionId::new(id),
        group,
        interactive: false,
        label,
        display_name: label,
        anatomical_name: label,
    }
}

use MuscleGroup::*;

pub(super) static REGIONS: &[MuscleRegion] = &[
    // Head
    region("head", Head, "头部/颈部", "颈部 (Neck)", "颈部肌肉 (Neck Muscles)"),
    // Chest
    region(
        "upper_chest",
        Chest,
        "上胸 (Upper)",
        "上胸 (Upper Chest)",
        "上胸肌 (Clavicular Head of Pectoralis Major)",
    ),
    region(
        "middle_chest",
        Chest,
        "中胸 (Middle)",
        "中胸 (Middle Chest)",
        "胸大肌中部 (Sternal Head of Pectoralis Major)",
    ),
    region(
        "lower_chest",
        Chest,
        "下胸 (Lower)",
        "下胸 (Lower Chest)",
        "下胸肌 (Abdominal Head of Pectoralis Major)",
    ),
    region(
        "outer_chest",
        Chest,
        "外沿 (Outer)",
        "胸肌外沿 (Outer Chest)",
        "胸肌外沿 (Outer Costal fibers of Pectoralis)",
    ),
    // Back
    region("traps", Back, "斜方肌", "斜方肌 (Trapezius)", "斜方肌 (Trapezius)"),
    region("lats", Back, "背阔肌", "背阔肌 (Lats)", "背阔肌 (Latissimus Dorsi)"),
    region("rhomboids", Back, "菱形肌", "菱形肌 (Rhomboids)", "菱形肌 (Rhomboids)"),
    region(
        "teres",
        Back,
        "大圆肌",
        "大圆肌/小圆肌 (Teres)",
        "大圆肌和小圆肌 (Teres Major and Minor)",
    ),
    region(
        "lower_back",
        Back,
        "竖脊肌",
        "竖脊肌 (Lower Back)",
        "竖脊肌 (Erector Spinae)",
    ),
    // Shoulders
    region(
        "front_delt",
        Shoulder,
        "前束",
        "三角肌前束 (Front Delt)",
        "三角肌前束 (Anterior Deltoid)",
    ),
    region(
        "side_delt",
        Shoulder,
        "中束",
        "三角肌中束 (Side Delt)",
        "三角肌中束 (Lateral Deltoid)",
    ),
    region(
        "rear_delt",
        Shoulder,
        "后束",
        "三角肌后束 (Rear Delt)",
        "三角肌后束 (Posterior Deltoid)",
    ),
    // Arms
    region(
        "biceps_long",
        Arm,
        "长头",
        "肱二头肌-长头 (Long Head)",
        "肱二头肌长头 (Long Head of Biceps Brachii - Outer peak)",
    ),
    region(
        "biceps_short",
        Arm,
        "短头",
        "肱二头肌-短头 (Short Head)",
        "肱二头肌短头 (Short Head of Biceps Brachii - Inner thickness)",
    ),
    region(
        "brachialis",
        Arm,
        "肱肌",
        "肱肌 (Brachialis)",
        "肱肌 (Brachialis - Muscle underneath biceps)",
    ),
    region(
        "triceps_long",
        Arm,
        "三头-长头",
        "肱三头肌-长头 (Long Head)",
        "肱三头肌长头 (Long Head of Triceps Brachii)",
    ),
    region(
        "triceps_lateral",
        Arm,
        "三头-外侧头",
        "肱三头肌-外侧头 (Lateral Head)",
        "肱三头肌外侧头 (Lateral Head of Triceps Brachii)",
    ),
    region(
        "forearms",
        Arm,
        "前臂",
        "前臂 (Forearms)",
        "前臂屈肌和伸肌 (Forearms)",
    ),
    // Core
    region(
        "abs_upper",
        Core,
        "上腹",
        "上腹肌 (Upper Abs)",
        "上腹直肌 (Upper Rectus Abdominis)",
    ),
    region(
        "abs_lower",
        Core,
        "下腹",
        "下腹肌 (Lower Abs)",
        "下腹直肌 (Lower Rectus Abdominis)",
    ),
    region(
        "obliques",
        Core,
        "腹外斜肌",
        "腹外斜肌/人鱼线 (Obliques)",
        "腹外斜肌 (External Obliques)",
    ),
    // Legs
    region("glutes", Leg, "臀大肌", "臀大肌 (Glutes)", "臀大肌 (Glutes)"),
    region("quads", Leg, "股四头肌", "股四头肌 (Quads)", "股四头肌 (Quadriceps)"),
    region(
        "hamstrings",
        Leg,
        "腘绳肌",
        "腘绳肌 (Hamstrings)",
        "腘绳肌 (Hamstrings)",
    ),
    region("calves", Leg, "小腿", "小腿 (Calves)", "小腿肌群 (Calves)"),
    // Decorative backdrop
    decorative("torso", Core, "躯干"),
    decorative("pelvis", Core, "骨盆"),
];
