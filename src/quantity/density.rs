quantity!(KilogramsPerCubicMetre, suffix: "kg/m³", precision: 1);
