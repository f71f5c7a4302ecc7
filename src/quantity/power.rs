quantity!(Watts, suffix: "W", precision: 1);
